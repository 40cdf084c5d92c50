//! Synthetic hands for unit tests.

use shared_types::{Landmark, LANDMARK_COUNT, WRIST};

use crate::domain::{FingerKind, HandLandmarks};

const WRIST_AT: (f64, f64) = (0.5, 0.9);

// Index, middle, ring, pinky
const BASES: [(f64, f64); 4] = [(0.4, 0.6), (0.5, 0.6), (0.6, 0.62), (0.7, 0.66)];
const TIPS: [(f64, f64); 4] = [(0.38, 0.3), (0.5, 0.25), (0.63, 0.3), (0.76, 0.42)];

const THUMB_STRAIGHT: [(f64, f64); 4] = [(0.4, 0.85), (0.3, 0.8), (0.2, 0.75), (0.1, 0.7)];
const THUMB_TUCKED: [(f64, f64); 4] = [(0.4, 0.85), (0.3, 0.8), (0.32, 0.7), (0.4, 0.68)];

fn pt((x, y): (f64, f64)) -> Landmark {
    Landmark::new(x, y, 0.0)
}

fn lerp(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Upright hand (middle base straight above the wrist) with the given
/// fingers extended, thumb first.
pub(crate) fn upright_hand(pattern: [bool; 5]) -> HandLandmarks {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = pt(WRIST_AT);

    let thumb = if pattern[0] {
        THUMB_STRAIGHT
    } else {
        THUMB_TUCKED
    };
    for (index, joint) in FingerKind::Thumb.joint_indices().into_iter().zip(thumb) {
        points[index] = pt(joint);
    }

    for (i, kind) in FingerKind::ALL[1..].iter().enumerate() {
        let base = BASES[i];
        // A curled tip sits between the base and the wrist
        let tip = if pattern[i + 1] {
            TIPS[i]
        } else {
            lerp(base, WRIST_AT, 0.3)
        };
        let [b, p, d, t] = kind.joint_indices();
        points[b] = pt(base);
        points[p] = pt(lerp(base, tip, 1.0 / 3.0));
        points[d] = pt(lerp(base, tip, 2.0 / 3.0));
        points[t] = pt(tip);
    }

    HandLandmarks::new(points)
}

/// Rotate a hand a quarter turn about its wrist so "up" becomes "right".
pub(crate) fn rotated_right(hand: &HandLandmarks) -> HandLandmarks {
    let wrist = *hand.wrist();
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    for (out, point) in points.iter_mut().zip(hand.as_slice()) {
        let dx = point.x - wrist.x;
        let dy = point.y - wrist.y;
        *out = Landmark::new(wrist.x - dy, wrist.y + dx, point.z);
    }
    HandLandmarks::new(points)
}
