//! # Subscription Masks
//!
//! A consumer declares which data categories it wants with a handshake frame:
//! the delimiter `:` followed by one character per category, in the order
//! landmarks, orientation, gesture. `'1'` means wanted, anything else
//! (including a missing position) means not wanted.
//!
//! ```text
//! ":011"  ->  landmarks: no, orientation: yes, gesture: yes
//! ":1"    ->  landmarks: yes, orientation: no,  gesture: no
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WireError;

/// Leading character of every handshake frame.
pub const HANDSHAKE_DELIMITER: char = ':';

/// Number of categories in a preference string.
pub const PREFERENCE_WIDTH: usize = 3;

/// The categories of pose data a consumer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SubscriptionMask {
    pub want_landmarks: bool,
    pub want_orientation: bool,
    pub want_gesture: bool,
}

impl SubscriptionMask {
    /// Every category.
    pub const ALL: Self = Self {
        want_landmarks: true,
        want_orientation: true,
        want_gesture: true,
    };

    /// No category. Such a consumer still receives one (empty) payload per
    /// publication, so it can observe frame timing.
    pub const NONE: Self = Self {
        want_landmarks: false,
        want_orientation: false,
        want_gesture: false,
    };

    pub const fn new(want_landmarks: bool, want_orientation: bool, want_gesture: bool) -> Self {
        Self {
            want_landmarks,
            want_orientation,
            want_gesture,
        }
    }

    /// Parse a bare preference string (no delimiter).
    pub fn from_preferences(preferences: &str) -> Self {
        let mut flags = [false; PREFERENCE_WIDTH];
        for (slot, c) in flags.iter_mut().zip(preferences.chars()) {
            *slot = c == '1';
        }
        Self::new(flags[0], flags[1], flags[2])
    }

    /// Parse a full handshake frame (`":" + preferences`).
    pub fn parse_handshake(frame: &str) -> Result<Self, WireError> {
        frame
            .strip_prefix(HANDSHAKE_DELIMITER)
            .map(Self::from_preferences)
            .ok_or_else(|| WireError::NotHandshake(frame.to_string()))
    }

    /// Whether a text frame is a handshake.
    pub fn is_handshake(frame: &str) -> bool {
        frame.starts_with(HANDSHAKE_DELIMITER)
    }

    /// Preference string without the delimiter, e.g. `"011"`.
    pub fn preferences(&self) -> String {
        [self.want_landmarks, self.want_orientation, self.want_gesture]
            .iter()
            .map(|&wanted| if wanted { '1' } else { '0' })
            .collect()
    }

    /// Handshake frame a consumer sends to declare this mask.
    pub fn to_handshake(&self) -> String {
        format!("{}{}", HANDSHAKE_DELIMITER, self.preferences())
    }
}

impl fmt::Display for SubscriptionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preferences())
    }
}
