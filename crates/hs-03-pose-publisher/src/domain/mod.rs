//! Domain Layer - Pacing and configuration, no I/O

pub mod config;
pub mod governor;
pub mod state;

pub use config::{ConfigError, GovernorConfig, PublisherConfig};
pub use governor::{Admission, RateGovernor};
pub use state::ConnectionState;
