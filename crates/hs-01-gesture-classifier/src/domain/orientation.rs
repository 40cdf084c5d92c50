//! Hand orientation from the wrist → middle-finger-base vector.
//!
//! Image coordinates: x grows to the right, y grows downward, so "up" means
//! the base joint has a smaller y than the wrist.

use serde::{Deserialize, Serialize};
use shared_types::Landmark;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
    /// Only meaningful in gesture definitions: matches every orientation.
    Any,
    /// Not resolved yet.
    #[default]
    Unknown,
}

impl Orientation {
    /// Resolve orientation from the wrist and the middle finger's base joint.
    ///
    /// Vertical wins only when the vertical offset strictly dominates; a
    /// perfect diagonal is treated as horizontal.
    pub fn from_wrist_and_base(wrist: &Landmark, middle_base: &Landmark) -> Self {
        let dx = middle_base.x - wrist.x;
        let dy = middle_base.y - wrist.y;

        if dx.abs() < dy.abs() {
            if middle_base.y < wrist.y {
                Orientation::Up
            } else {
                Orientation::Down
            }
        } else if middle_base.x > wrist.x {
            Orientation::Right
        } else {
            Orientation::Left
        }
    }

    /// Whether this value is a concrete direction.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Orientation::Any | Orientation::Unknown)
    }

    /// Definition-side check: does a required orientation accept `actual`?
    pub fn accepts(&self, actual: Orientation) -> bool {
        *self == Orientation::Any || *self == actual
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::Down => "down",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::Any => "any",
            Orientation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Orientation::Up),
            "down" => Ok(Orientation::Down),
            "left" => Ok(Orientation::Left),
            "right" => Ok(Orientation::Right),
            "any" => Ok(Orientation::Any),
            "unknown" => Ok(Orientation::Unknown),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}
