//! Synthetic hands in the shape a pose estimator reports them: 21 raw
//! `(x, y, z)` triples in image coordinates, y growing downward.

const WRIST: (f64, f64) = (0.5, 0.9);

// Index, middle, ring, pinky
const BASES: [(f64, f64); 4] = [(0.4, 0.6), (0.5, 0.6), (0.6, 0.62), (0.7, 0.66)];
const TIPS: [(f64, f64); 4] = [(0.38, 0.3), (0.5, 0.25), (0.63, 0.3), (0.76, 0.42)];

const THUMB_STRAIGHT: [(f64, f64); 4] = [(0.4, 0.85), (0.3, 0.8), (0.2, 0.75), (0.1, 0.7)];
const THUMB_TUCKED: [(f64, f64); 4] = [(0.4, 0.85), (0.3, 0.8), (0.32, 0.7), (0.4, 0.68)];

fn lerp(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Upright hand with the given fingers extended, thumb first.
pub fn upright_hand(pattern: [bool; 5]) -> Vec<(f64, f64, f64)> {
    let mut points = Vec::with_capacity(21);
    points.push(WRIST);
    points.extend(if pattern[0] { THUMB_STRAIGHT } else { THUMB_TUCKED });

    for (i, (base, straight_tip)) in BASES.into_iter().zip(TIPS).enumerate() {
        let tip = if pattern[i + 1] {
            straight_tip
        } else {
            lerp(base, WRIST, 0.3)
        };
        points.push(base);
        points.push(lerp(base, tip, 1.0 / 3.0));
        points.push(lerp(base, tip, 2.0 / 3.0));
        points.push(tip);
    }

    points.into_iter().map(|(x, y)| (x, y, 0.0)).collect()
}

pub fn open_hand() -> Vec<(f64, f64, f64)> {
    upright_hand([true; 5])
}

pub fn fist() -> Vec<(f64, f64, f64)> {
    upright_hand([false; 5])
}
