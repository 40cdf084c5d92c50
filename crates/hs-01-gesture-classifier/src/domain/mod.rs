//! Domain Layer - Pure geometry and gesture rules
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Every function is deterministic over its inputs

pub mod angles;
pub mod config;
pub mod finger;
pub mod gesture;
pub mod hand_pose;
pub mod landmarks;
pub mod orientation;

pub use angles::{angle_at, ANGLE_EPSILON};
pub use config::{ClassifierConfig, DEFAULT_SAMPLE_INTERVAL};
pub use finger::{Finger, FingerKind, FINGER_EXTENSION_DEG, THUMB_EXTENSION_DEG};
pub use gesture::{default_definitions, ExtensionPattern, Gesture, GestureDefinition, MatchPolicy};
pub use hand_pose::HandPose;
pub use landmarks::HandLandmarks;
pub use orientation::Orientation;
