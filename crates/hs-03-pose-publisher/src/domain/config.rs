//! Publisher configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default relay endpoint
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8765";

/// Default delay between connection attempts
pub const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_secs(2);

/// Default governor budget (messages per window)
pub const DEFAULT_MAX_PER_WINDOW: usize = 70;

/// Default governor window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

pub const ENV_URL: &str = "HS_PUBLISHER_URL";
pub const ENV_BACKOFF_MS: &str = "HS_PUBLISHER_BACKOFF_MS";
pub const ENV_GOVERNOR_ENABLED: &str = "HS_GOVERNOR_ENABLED";
pub const ENV_GOVERNOR_MAX_PER_WINDOW: &str = "HS_GOVERNOR_MAX_PER_WINDOW";

/// Publisher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Relay URL (`ws://` or `wss://`)
    pub endpoint: String,
    /// Fixed wait between failed connection attempts
    #[serde(with = "shared_types::durations")]
    pub reconnect_backoff: Duration,
    /// Outbound pacing
    pub governor: GovernorConfig,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
            governor: GovernorConfig::default(),
        }
    }
}

/// Rate governor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorConfig {
    /// Pace sends; when off, every event is sent as soon as it is dequeued
    pub enabled: bool,
    pub max_per_window: usize,
    #[serde(with = "shared_types::durations")]
    pub window: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_per_window: DEFAULT_MAX_PER_WINDOW,
            window: DEFAULT_WINDOW,
        }
    }
}

impl PublisherConfig {
    /// Config for a specific endpoint, defaults elsewhere.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

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

        if let Some(url) = lookup(ENV_URL) {
            config.endpoint = url.trim().to_string();
        }
        if let Some(ms) = lookup(ENV_BACKOFF_MS) {
            config.reconnect_backoff = Duration::from_millis(parse_var(ENV_BACKOFF_MS, &ms)?);
        }
        if let Some(enabled) = lookup(ENV_GOVERNOR_ENABLED) {
            config.governor.enabled = parse_flag(ENV_GOVERNOR_ENABLED, &enabled)?;
        }
        if let Some(max) = lookup(ENV_GOVERNOR_MAX_PER_WINDOW) {
            config.governor.max_per_window = parse_var(ENV_GOVERNOR_MAX_PER_WINDOW, &max)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        if self.reconnect_backoff.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "reconnect_backoff must be greater than zero".to_string(),
            ));
        }

        if self.governor.enabled {
            if self.governor.max_per_window == 0 {
                return Err(ConfigError::InvalidRateLimit(
                    "max_per_window must be greater than zero".to_string(),
                ));
            }
            if self.governor.window.is_zero() {
                return Err(ConfigError::InvalidRateLimit(
                    "window must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint {0:?}: expected ws:// or wss:// URL")]
    InvalidEndpoint(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
