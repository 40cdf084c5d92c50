//! # Pose Events
//!
//! The publication frame carried over the relay:
//!
//! ```text
//! { "Left":  {"Landmarks": {"0": {"x":..,"y":..,"z":..}, ...},
//!             "Orientation": "up",
//!             "Gesture": "open_palm"},
//!   "Right": null }
//! ```
//!
//! Every field is optional. A missing key, JSON `null` and the placeholder
//! string `"None"` all decode to absence. On encode, absent hands are written
//! as `null` and absent hand fields are omitted.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::entities::{Handedness, Landmark};
use crate::errors::WireError;
use crate::subscription::{SubscriptionMask, HANDSHAKE_DELIMITER};

/// Literal keepalive frame. Answered with a protocol pong, never broadcast.
pub const PING_FRAME: &str = "ping";

/// Placeholder some producers send instead of `null`.
const ABSENT_PLACEHOLDER: &str = "None";

/// Landmarks keyed by joint index.
pub type LandmarkMap = BTreeMap<usize, Landmark>;

/// One hand's worth of published data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPayload {
    #[serde(
        rename = "Landmarks",
        default,
        deserialize_with = "landmarks_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub landmarks: Option<LandmarkMap>,

    #[serde(
        rename = "Orientation",
        default,
        deserialize_with = "value_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub orientation: Option<String>,

    #[serde(
        rename = "Gesture",
        default,
        deserialize_with = "value_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub gesture: Option<String>,
}

impl HandPayload {
    /// Keep only the categories the mask asks for.
    pub fn project(&self, mask: SubscriptionMask) -> HandPayload {
        HandPayload {
            landmarks: self.landmarks.clone().filter(|_| mask.want_landmarks),
            orientation: self.orientation.clone().filter(|_| mask.want_orientation),
            gesture: self.gesture.clone().filter(|_| mask.want_gesture),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_none() && self.orientation.is_none() && self.gesture.is_none()
    }
}

/// Both hands for one sampled frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseEvent {
    #[serde(rename = "Left", default, deserialize_with = "value_or_absent")]
    pub left: Option<HandPayload>,

    #[serde(rename = "Right", default, deserialize_with = "value_or_absent")]
    pub right: Option<HandPayload>,
}

impl PoseEvent {
    pub fn new(left: Option<HandPayload>, right: Option<HandPayload>) -> Self {
        Self { left, right }
    }

    pub fn hand(&self, handedness: Handedness) -> Option<&HandPayload> {
        match handedness {
            Handedness::Left => self.left.as_ref(),
            Handedness::Right => self.right.as_ref(),
        }
    }

    pub fn set_hand(&mut self, handedness: Handedness, payload: HandPayload) {
        match handedness {
            Handedness::Left => self.left = Some(payload),
            Handedness::Right => self.right = Some(payload),
        }
    }

    /// Trim the event down to what a consumer subscribed to.
    pub fn project(&self, mask: SubscriptionMask) -> PoseEvent {
        PoseEvent {
            left: self.left.as_ref().map(|hand| hand.project(mask)),
            right: self.right.as_ref().map(|hand| hand.project(mask)),
        }
    }

    pub fn decode(text: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// How the relay interprets an inbound text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame<'a> {
    /// Keepalive probe.
    Ping,
    /// Subscription declaration.
    Handshake(SubscriptionMask),
    /// Anything else is a publication to fan out.
    Publication(&'a str),
}

impl<'a> InboundFrame<'a> {
    pub fn classify(text: &'a str) -> Self {
        if text == PING_FRAME {
            InboundFrame::Ping
        } else if let Some(preferences) = text.strip_prefix(HANDSHAKE_DELIMITER) {
            InboundFrame::Handshake(SubscriptionMask::from_preferences(preferences))
        } else {
            InboundFrame::Publication(text)
        }
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == ABSENT_PLACEHOLDER,
        _ => false,
    }
}

fn value_or_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(D::Error::custom)
}

/// Accepts either an object keyed by joint index or a plain ordered list.
fn landmarks_or_absent<'de, D>(deserializer: D) -> Result<Option<LandmarkMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(None);
    }

    let mut landmarks = LandmarkMap::new();
    match value {
        Value::Object(entries) => {
            for (key, point) in entries {
                let index = key
                    .parse::<usize>()
                    .map_err(|_| D::Error::custom(format!("invalid joint index {key:?}")))?;
                let landmark = serde_json::from_value(point).map_err(D::Error::custom)?;
                landmarks.insert(index, landmark);
            }
        }
        Value::Array(points) => {
            for (index, point) in points.into_iter().enumerate() {
                let landmark = serde_json::from_value(point).map_err(D::Error::custom)?;
                landmarks.insert(index, landmark);
            }
        }
        other => {
            return Err(D::Error::custom(format!(
                "expected landmark object or list, found {other}"
            )))
        }
    }
    Ok(Some(landmarks))
}
