//! Classifier configuration and validation

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::gesture::{default_definitions, GestureDefinition, MatchPolicy};
use super::orientation::Orientation;
use crate::error::ConfigError;

/// Default frame sampling interval.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum spacing between emitted frames, independent of camera rate.
    #[serde(with = "shared_types::durations")]
    pub sample_interval: Duration,
    pub match_policy: MatchPolicy,
    /// Custom gesture table. `None` uses the built-in one.
    pub gestures: Option<Vec<GestureDefinition>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            match_policy: MatchPolicy::default(),
            gestures: None,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval.is_zero() {
            return Err(ConfigError::InvalidInterval(
                "sample_interval must be greater than zero".to_string(),
            ));
        }

        if let Some(gestures) = &self.gestures {
            if gestures.is_empty() {
                return Err(ConfigError::InvalidGestureTable(
                    "gesture table is empty".to_string(),
                ));
            }
            // A hand is never classified with Unknown orientation
            if let Some(def) = gestures
                .iter()
                .find(|def| def.orientation == Orientation::Unknown)
            {
                return Err(ConfigError::InvalidGestureTable(format!(
                    "{} requires orientation \"unknown\", which never matches",
                    def.gesture
                )));
            }
        }

        Ok(())
    }

    /// Gesture table this config resolves to.
    pub fn definitions(&self) -> Vec<GestureDefinition> {
        self.gestures.clone().unwrap_or_else(default_definitions)
    }
}
