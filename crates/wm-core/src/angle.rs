//! Periodic angle helpers.
//!
//! Bearings are radians measured counter-clockwise from the local x axis
//! (east), as produced by `atan2(dy, dx)` in a [`LocalMap`](crate::LocalMap)
//! plane.  Nothing here assumes inputs are already wrapped into `[0, 2π)`.

use std::f64::consts::{PI, TAU};

/// Shortest distance between `a` and `b` on a circle of period `p`.
///
/// Always in `[0, p/2]` and symmetric in its arguments.  Exact for any finite
/// input, including angles far outside one period.
#[inline]
pub fn periodic_distance(a: f64, b: f64, p: f64) -> f64 {
    let half = 0.5 * p;
    ((a - b + half).rem_euclid(p) - half).abs()
}

/// [`periodic_distance`] with period `2π`: the angle between two bearings.
#[inline]
pub fn bearing_distance(a: f64, b: f64) -> f64 {
    periodic_distance(a, b, TAU)
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if r >= TAU { 0.0 } else { r }
}

/// The opposite bearing, wrapped into `[0, 2π)`.
#[inline]
pub fn reverse(a: f64) -> f64 {
    normalize(a + PI)
}
