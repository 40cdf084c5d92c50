//! Error types for the gesture classifier

use shared_types::WireError;
use thiserror::Error;

/// Errors raised while turning raw detections into hand poses.
///
/// Classification itself is infallible; only building validated inputs and
/// configuration can fail.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Wrong landmark count: expected {expected}, found {found}")]
    WrongLandmarkCount { expected: usize, found: usize },

    #[error("Invalid detection: {0}")]
    InvalidDetection(#[from] WireError),

    #[error("Invalid classifier configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Classifier configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid sample interval: {0}")]
    InvalidInterval(String),

    #[error("invalid gesture table: {0}")]
    InvalidGestureTable(String),
}
