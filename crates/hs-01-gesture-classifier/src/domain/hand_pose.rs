//! Classified snapshot of one hand in one frame.

use shared_types::{Handedness, Landmark};

use super::finger::{Finger, FingerKind};
use super::gesture::{ExtensionPattern, Gesture};
use super::landmarks::HandLandmarks;
use super::orientation::Orientation;

/// Immutable once built; produced by the classifier for a single frame and
/// not meant to be kept across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    landmarks: HandLandmarks,
    fingers: [Finger; 5],
    handedness: Handedness,
    orientation: Orientation,
    gesture: Gesture,
}

impl HandPose {
    pub(crate) fn new(
        landmarks: HandLandmarks,
        fingers: [Finger; 5],
        handedness: Handedness,
        orientation: Orientation,
        gesture: Gesture,
    ) -> Self {
        Self {
            landmarks,
            fingers,
            handedness,
            orientation,
            gesture,
        }
    }

    pub fn landmarks(&self) -> &HandLandmarks {
        &self.landmarks
    }

    pub fn wrist(&self) -> &Landmark {
        self.landmarks.wrist()
    }

    /// Fingers in thumb → pinky order.
    pub fn fingers(&self) -> &[Finger; 5] {
        &self.fingers
    }

    pub fn finger(&self, kind: FingerKind) -> &Finger {
        &self.fingers[kind.position()]
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn extension_pattern(&self) -> ExtensionPattern {
        ExtensionPattern::from_fingers(&self.fingers)
    }
}
