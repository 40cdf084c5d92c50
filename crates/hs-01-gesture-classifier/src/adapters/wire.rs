//! HandPose → wire payload conversion.

use shared_types::{HandPayload, PoseEvent};

use crate::domain::HandPose;

impl From<&HandPose> for HandPayload {
    fn from(pose: &HandPose) -> Self {
        HandPayload {
            landmarks: Some(pose.landmarks().to_map()),
            orientation: Some(pose.orientation().as_str().to_string()),
            gesture: Some(pose.gesture().as_str().to_string()),
        }
    }
}

/// Assemble a publication from the poses classified in one frame.
///
/// Each pose lands in its handedness slot; a later pose with the same
/// handedness replaces an earlier one. Hands without a pose stay absent.
pub fn pose_event<'a>(poses: impl IntoIterator<Item = &'a HandPose>) -> PoseEvent {
    let mut event = PoseEvent::default();
    for pose in poses {
        event.set_hand(pose.handedness(), HandPayload::from(pose));
    }
    event
}
