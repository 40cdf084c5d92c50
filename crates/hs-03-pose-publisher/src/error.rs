//! Error types for the publisher

use shared_types::WireError;
use thiserror::Error;

use crate::domain::ConfigError;

/// Errors that can occur in the publisher
#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Invalid publisher configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Connection to {endpoint} failed: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("Send failed: {0}")]
    Send(String),

    /// The publishing task has stopped; nothing more can be enqueued.
    #[error("Publisher closed")]
    Closed,

    #[error("Encoding error: {0}")]
    Encode(#[from] WireError),
}
