//! Gesture Classifier Service
//!
//! Orchestrates the domain rules: evaluate each finger against the wrist,
//! resolve orientation, then look the extension pattern up in the gesture
//! table.

use shared_types::Handedness;
use tracing::trace;

use crate::domain::{
    default_definitions, ClassifierConfig, ExtensionPattern, Finger, FingerKind, Gesture,
    GestureDefinition, HandLandmarks, HandPose, MatchPolicy, Orientation,
};
use crate::error::ClassifierError;
use crate::ports::PoseClassifier;

/// Owns a read-only gesture table; cheap to share behind `&` or `Arc`.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    definitions: Vec<GestureDefinition>,
    policy: MatchPolicy,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(default_definitions(), MatchPolicy::default())
    }
}

impl GestureClassifier {
    pub fn new(definitions: Vec<GestureDefinition>, policy: MatchPolicy) -> Self {
        Self {
            definitions,
            policy,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        Ok(Self::new(config.definitions(), config.match_policy))
    }

    pub fn definitions(&self) -> &[GestureDefinition] {
        &self.definitions
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Look up a gesture for an orientation and extension pattern.
    ///
    /// Returns [`Gesture::Unknown`] when no definition matches.
    pub fn match_gesture(&self, orientation: Orientation, pattern: ExtensionPattern) -> Gesture {
        let mut matches = self
            .definitions
            .iter()
            .filter(|def| def.matches(orientation, pattern));

        let winner = match self.policy {
            MatchPolicy::LastMatchWins => matches.last(),
            MatchPolicy::FirstMatchWins => matches.next(),
        };
        winner.map_or(Gesture::Unknown, |def| def.gesture)
    }

    fn build_pose(
        &self,
        landmarks: &HandLandmarks,
        handedness: Handedness,
        orientation: Orientation,
    ) -> HandPose {
        let fingers = FingerKind::ALL.map(|kind| Finger::evaluate(kind, landmarks));

        let orientation = if orientation == Orientation::Unknown {
            Orientation::from_wrist_and_base(landmarks.wrist(), landmarks.middle_base())
        } else {
            orientation
        };

        let pattern = ExtensionPattern::from_fingers(&fingers);
        let gesture = self.match_gesture(orientation, pattern);

        trace!(
            handedness = %handedness,
            orientation = %orientation,
            pattern = %pattern,
            gesture = %gesture,
            "Classified hand"
        );

        HandPose::new(landmarks.clone(), fingers, handedness, orientation, gesture)
    }
}

impl PoseClassifier for GestureClassifier {
    fn classify(&self, landmarks: &HandLandmarks, handedness: Handedness) -> HandPose {
        self.build_pose(landmarks, handedness, Orientation::Unknown)
    }

    fn classify_with_orientation(
        &self,
        landmarks: &HandLandmarks,
        handedness: Handedness,
        orientation: Orientation,
    ) -> HandPose {
        self.build_pose(landmarks, handedness, orientation)
    }
}
