//! Gesture vocabulary and the definition table it is matched against.
//!
//! A gesture is recognized purely from which fingers are extended and, when a
//! definition asks for it, the hand's orientation. Definitions are evaluated
//! in table order; with the default [`MatchPolicy::LastMatchWins`] the final
//! matching entry decides, so tables are written broad → specific.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::finger::{Finger, FingerKind};
use super::orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    OpenPalm,
    Stop,
    Fist,
    Pointing,
    Peace,
    ThumbsUp,
    MiddleFinger,
    Rock,
    CallMe,
    #[default]
    Unknown,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::OpenPalm => "open_palm",
            Gesture::Stop => "stop",
            Gesture::Fist => "fist",
            Gesture::Pointing => "pointing",
            Gesture::Peace => "peace",
            Gesture::ThumbsUp => "thumbs_up",
            Gesture::MiddleFinger => "middle_finger",
            Gesture::Rock => "rock",
            Gesture::CallMe => "call_me",
            Gesture::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Gesture::Unknown
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected extension flag per finger, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExtensionPattern {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl ExtensionPattern {
    /// Every finger extended.
    pub const OPEN: Self = Self::from_array([true; 5]);
    /// Every finger curled.
    pub const CLOSED: Self = Self::from_array([false; 5]);

    pub const fn from_array(flags: [bool; 5]) -> Self {
        let [thumb, index, middle, ring, pinky] = flags;
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn from_fingers(fingers: &[Finger; 5]) -> Self {
        let mut flags = [false; 5];
        for finger in fingers {
            flags[finger.kind().position()] = finger.extended();
        }
        Self::from_array(flags)
    }

    pub const fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    pub fn is_extended(&self, kind: FingerKind) -> bool {
        self.as_array()[kind.position()]
    }

    pub fn extended_count(&self) -> usize {
        self.as_array().iter().filter(|flag| **flag).count()
    }
}

impl fmt::Display for ExtensionPattern {
    /// Compact `10010`-style rendering, thumb first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in self.as_array() {
            f.write_str(if flag { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// One row of the gesture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureDefinition {
    pub gesture: Gesture,
    /// Required orientation, or [`Orientation::Any`].
    pub orientation: Orientation,
    pub pattern: ExtensionPattern,
}

impl GestureDefinition {
    pub const fn new(gesture: Gesture, orientation: Orientation, pattern: ExtensionPattern) -> Self {
        Self {
            gesture,
            orientation,
            pattern,
        }
    }

    /// Orientation accepted and all five flags equal.
    pub fn matches(&self, orientation: Orientation, pattern: ExtensionPattern) -> bool {
        self.orientation.accepts(orientation) && self.pattern == pattern
    }
}

/// Which matching definition decides when several match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Scan the whole table; the last match wins.
    #[default]
    LastMatchWins,
    /// Stop at the first match.
    FirstMatchWins,
}

/// Built-in gesture table, broad → specific.
pub fn default_definitions() -> Vec<GestureDefinition> {
    use Gesture::*;
    use Orientation::{Any, Up};

    let p = ExtensionPattern::from_array;
    vec![
        GestureDefinition::new(OpenPalm, Any, ExtensionPattern::OPEN),
        // Upright open palm refines OpenPalm
        GestureDefinition::new(Stop, Up, ExtensionPattern::OPEN),
        GestureDefinition::new(Fist, Any, ExtensionPattern::CLOSED),
        GestureDefinition::new(ThumbsUp, Any, p([true, false, false, false, false])),
        GestureDefinition::new(Pointing, Any, p([false, true, false, false, false])),
        GestureDefinition::new(Peace, Any, p([false, true, true, false, false])),
        GestureDefinition::new(MiddleFinger, Any, p([false, false, true, false, false])),
        GestureDefinition::new(Rock, Any, p([false, true, false, false, true])),
        GestureDefinition::new(CallMe, Any, p([true, false, false, false, true])),
    ]
}
