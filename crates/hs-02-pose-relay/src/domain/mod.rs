//! Domain types for the relay.

pub mod config;
pub mod connection;
pub mod error;

pub use config::{ConfigError, RelayConfig};
pub use connection::ConnectionId;
pub use error::RelayError;
