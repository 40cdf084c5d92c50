//! # Handstream Telemetry
//!
//! Structured logging for the relay, the publisher and the tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use handstream_telemetry::{init_logging, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::for_component("relay"))?;
//!     // ...
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HS_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `HS_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |
//! | `HS_SERVICE_NAME` | `handstream` | Service name in the startup event |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging, try_init_for_tests};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}
