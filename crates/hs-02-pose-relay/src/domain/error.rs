//! Relay error types.

use std::net::SocketAddr;

use super::config::ConfigError;

/// Errors that stop the relay from starting or serving.
///
/// Per-connection problems (malformed frames, dead peers) are logged and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Listener or accept loop failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
