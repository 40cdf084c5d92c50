//! Joint angle calculation using the law of cosines
//!
//! Angles are measured in the image plane only; landmark depth is too noisy
//! to be useful for extension tests.

use shared_types::Landmark;

/// Side lengths shorter than this make the triangle degenerate.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Interior angle at `b` in degrees, formed by `a`, `b`, `c`.
///
/// Returns `None` when any side of the triangle is shorter than
/// [`ANGLE_EPSILON`], i.e. two of the points coincide.
///
/// - 180° = the three points lie on a straight line with `b` in the middle
/// - 90°  = right angle at `b`
pub fn angle_at(a: &Landmark, b: &Landmark, c: &Landmark) -> Option<f64> {
    let ab = a.planar_distance(b);
    let bc = b.planar_distance(c);
    let ac = a.planar_distance(c);

    if ab < ANGLE_EPSILON || bc < ANGLE_EPSILON || ac < ANGLE_EPSILON {
        return None;
    }

    // Clamp guards against rounding pushing near-collinear inputs past ±1
    let cos_b = ((ab * ab + bc * bc - ac * ac) / (2.0 * ab * bc)).clamp(-1.0, 1.0);
    Some(cos_b.acos().to_degrees())
}
