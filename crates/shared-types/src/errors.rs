//! # Error Types
//!
//! Errors raised while reading frames off the wire.

use thiserror::Error;

/// Errors that can occur while decoding wire-level frames.
#[derive(Debug, Error)]
pub enum WireError {
    /// Publication payload is not a valid pose event.
    #[error("Malformed pose event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    /// Handshake frame did not start with the handshake delimiter.
    #[error("Not a handshake frame: {0:?}")]
    NotHandshake(String),

    /// Handedness label not recognized.
    #[error("Unknown handedness label: {0}")]
    UnknownHandedness(String),
}
