//! Inbound Ports (Driving Ports)
//!
//! The API the producer side uses to turn landmarks into poses.

use shared_types::Handedness;

use crate::domain::{HandLandmarks, HandPose, Orientation};

/// Landmark → pose classification (Driving Port).
///
/// Implementations must be pure: the same landmarks always yield the same
/// pose.
pub trait PoseClassifier: Send + Sync {
    /// Classify a hand, deriving its orientation from the landmarks.
    fn classify(&self, landmarks: &HandLandmarks, handedness: Handedness) -> HandPose;

    /// Classify a hand with a caller-supplied orientation.
    ///
    /// [`Orientation::Unknown`] means "derive it", exactly like
    /// [`PoseClassifier::classify`].
    fn classify_with_orientation(
        &self,
        landmarks: &HandLandmarks,
        handedness: Handedness,
        orientation: Orientation,
    ) -> HandPose;
}
