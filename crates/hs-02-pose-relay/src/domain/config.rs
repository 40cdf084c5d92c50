//! Relay configuration with validation.
//!
//! Values come from serde (config files) or from `HS_RELAY_*` environment
//! variables layered over the defaults.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8765;

/// Default maximum inbound frame size (1MB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Default per-consumer outbox depth
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Default bound on a single receive call
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_HOST: &str = "HS_RELAY_HOST";
pub const ENV_PORT: &str = "HS_RELAY_PORT";
pub const ENV_RECV_TIMEOUT_MS: &str = "HS_RELAY_RECV_TIMEOUT_MS";
pub const ENV_MAX_MESSAGE_SIZE: &str = "HS_RELAY_MAX_MESSAGE_SIZE";

/// Relay server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port (0 picks an ephemeral port)
    pub port: u16,
    /// Upper bound on one receive; expiry just re-arms the wait
    #[serde(with = "shared_types::durations")]
    pub recv_timeout: Duration,
    /// Frames queued per consumer before deliveries to it are dropped
    pub outbox_capacity: usize,
    /// Inbound frames larger than this are dropped
    pub max_message_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST) {
            config.host = parse_var(ENV_HOST, &host)?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(ms) = lookup(ENV_RECV_TIMEOUT_MS) {
            config.recv_timeout = Duration::from_millis(parse_var(ENV_RECV_TIMEOUT_MS, &ms)?);
        }
        if let Some(size) = lookup(ENV_MAX_MESSAGE_SIZE) {
            config.max_message_size = parse_var(ENV_MAX_MESSAGE_SIZE, &size)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recv_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "recv_timeout must be greater than zero".to_string(),
            ));
        }

        if self.outbox_capacity == 0 {
            return Err(ConfigError::InvalidLimit(
                "outbox_capacity must be greater than zero".to_string(),
            ));
        }

        if self.max_message_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_message_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Get listen socket address
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Environment variable could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
