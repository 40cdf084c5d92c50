//! Finger extension tests.
//!
//! ## Rules
//!
//! - **Index, middle, ring, pinky**: extended when the angle at the base
//!   joint formed by {tip, base, wrist} is greater than 90°. A curled finger
//!   folds its tip back towards the wrist and closes that angle.
//! - **Thumb**: extended when all three chained angles (at CMC, MCP and IP)
//!   are at least 160°, i.e. the whole chain is nearly straight.
//!
//! A degenerate triangle anywhere in the test means "not extended".

use serde::{Deserialize, Serialize};
use shared_types::{
    Landmark, INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_DIP, MIDDLE_MCP, MIDDLE_PIP,
    MIDDLE_TIP, PINKY_DIP, PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_MCP, RING_PIP,
    RING_TIP, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP,
};
use std::fmt;

use super::angles::angle_at;
use super::landmarks::HandLandmarks;

/// Base-joint angle above which a non-thumb finger counts as extended.
pub const FINGER_EXTENSION_DEG: f64 = 90.0;

/// Minimum angle at each thumb joint for the thumb to count as extended.
pub const THUMB_EXTENSION_DEG: f64 = 160.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerKind {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerKind {
    /// Fingers in pattern order.
    pub const ALL: [FingerKind; 5] = [
        FingerKind::Thumb,
        FingerKind::Index,
        FingerKind::Middle,
        FingerKind::Ring,
        FingerKind::Pinky,
    ];

    /// Landmark indices from base to tip.
    pub const fn joint_indices(&self) -> [usize; 4] {
        match self {
            FingerKind::Thumb => [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
            FingerKind::Index => [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
            FingerKind::Middle => [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
            FingerKind::Ring => [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
            FingerKind::Pinky => [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
        }
    }

    pub const fn is_thumb(&self) -> bool {
        matches!(self, FingerKind::Thumb)
    }

    /// Position in an extension pattern (thumb = 0 .. pinky = 4).
    pub const fn position(&self) -> usize {
        match self {
            FingerKind::Thumb => 0,
            FingerKind::Index => 1,
            FingerKind::Middle => 2,
            FingerKind::Ring => 3,
            FingerKind::Pinky => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FingerKind::Thumb => "thumb",
            FingerKind::Index => "index",
            FingerKind::Middle => "middle",
            FingerKind::Ring => "ring",
            FingerKind::Pinky => "pinky",
        }
    }
}

impl fmt::Display for FingerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One digit of an evaluated hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finger {
    kind: FingerKind,
    joints: [Landmark; 4],
    extended: bool,
}

impl Finger {
    /// Pick the finger's joints out of the hand and test extension against
    /// the wrist.
    pub fn evaluate(kind: FingerKind, landmarks: &HandLandmarks) -> Self {
        let joints = kind.joint_indices().map(|index| landmarks[index]);
        let extended = is_extended(kind, &joints, landmarks.wrist());
        Self {
            kind,
            joints,
            extended,
        }
    }

    pub fn kind(&self) -> FingerKind {
        self.kind
    }

    pub fn is_thumb(&self) -> bool {
        self.kind.is_thumb()
    }

    pub fn joints(&self) -> &[Landmark; 4] {
        &self.joints
    }

    pub fn base(&self) -> &Landmark {
        &self.joints[0]
    }

    pub fn tip(&self) -> &Landmark {
        &self.joints[3]
    }

    pub fn extended(&self) -> bool {
        self.extended
    }
}

fn is_extended(kind: FingerKind, joints: &[Landmark; 4], wrist: &Landmark) -> bool {
    let [base, proximal, distal, tip] = joints;

    if kind.is_thumb() {
        let chain = [
            angle_at(wrist, base, proximal),
            angle_at(base, proximal, distal),
            angle_at(proximal, distal, tip),
        ];
        chain
            .iter()
            .all(|angle| angle.is_some_and(|deg| deg >= THUMB_EXTENSION_DEG))
    } else {
        angle_at(tip, base, wrist).is_some_and(|deg| deg > FINGER_EXTENSION_DEG)
    }
}
