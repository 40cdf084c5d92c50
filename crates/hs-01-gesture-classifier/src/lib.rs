//! # HS-01 Gesture Classifier
//!
//! Turns the 21 hand landmarks reported by a pose estimator into finger
//! extension flags, a hand orientation and a named gesture.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure geometry, no I/O
//!   - `angle_at`: Law-of-cosines joint angle in the image plane
//!   - `Finger`: Per-digit extension test against the wrist
//!   - `Orientation`: Wrist → middle-base direction
//!   - `GestureDefinition`: One row of the gesture table
//!   - `ClassifierConfig`: Sampling interval, match policy, custom table
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `PoseClassifier`: Driving port (landmarks in, pose out)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `GestureClassifier`: Implements `PoseClassifier`
//!   - `PoseProducer`: Frame sampling and event assembly
//!
//! - **Adapters Layer** (`adapters/`): `HandPose` → wire payload
//!
//! ## Rules
//!
//! - A non-thumb finger is extended when the angle at its base joint,
//!   between the tip and the wrist, exceeds 90°.
//! - The thumb is extended when every joint in its chain is at least 160°.
//! - Coincident points never panic or produce NaN; the finger is simply not
//!   extended.
//! - Gesture lookup scans the whole table and the last match wins unless
//!   `MatchPolicy::FirstMatchWins` is configured.
//!
//! ## Usage Example
//!
//! ```ignore
//! use hs_01_gesture_classifier::{GestureClassifier, HandLandmarks, PoseClassifier};
//! use shared_types::Handedness;
//!
//! let classifier = GestureClassifier::default();
//! let landmarks = HandLandmarks::from_slice(&points)?;
//! let pose = classifier.classify(&landmarks, Handedness::Right);
//! println!("{} {}", pose.orientation(), pose.gesture());
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

#[cfg(test)]
mod fixtures;

// Re-exports for convenience
pub use adapters::pose_event;
pub use domain::{
    angle_at, default_definitions, ClassifierConfig, ExtensionPattern, Finger, FingerKind,
    Gesture, GestureDefinition, HandLandmarks, HandPose, MatchPolicy, Orientation,
};
pub use error::{ClassifierError, ConfigError};
pub use ports::PoseClassifier;
pub use service::{DetectedHand, FrameSampler, GestureClassifier, PoseProducer};
