#![warn(missing_docs)]
//! Small geometric helper functions used throughout the surface construction
//!
//! The eye surfaces are all derived from chords: a lens of a given axial height spans a
//! chord of that height on the circle of its surface curvature. The two helpers below
//! give the half-angle subtended by such a chord and its axial offset from the circle
//! center.
use std::f64::consts::TAU;

/// Half-angle subtended by a chord of the given height on a circle of the given radius.
///
/// Returns `NaN` if `height / 2 > radius` (the chord does not fit on the circle).
/// Callers must guard against this, see
/// [`build_surfaces`](crate::eye::build_surfaces) which clamps its inputs accordingly.
#[must_use]
pub fn chord_half_angle(radius: f64, height: f64) -> f64 {
    (height / 2.0 / radius).asin()
}

/// Axial offset of a chord of the given height from the center of a circle of the
/// given radius.
///
/// Returns `NaN` if `height / 2 > radius`, see [`chord_half_angle`].
#[must_use]
pub fn chord_x_offset(radius: f64, height: f64) -> f64 {
    (radius * radius - (height / 2.0) * (height / 2.0)).sqrt()
}

/// Normalizes an angle into the interval `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut normalized = angle % TAU;
    if normalized < 0.0 {
        normalized += TAU;
    }
    normalized
}
