//! Scalar helpers shared by the vector, matrix and rotation types.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`clamp`] | Saturate a value into `[min, max]` |
//! | [`rand_int`] / [`rand_float`] | Uniform random numbers in a range |
//! | [`signed_angle`] | Signed (optionally elliptic) angle between two vectors |
//! | [`to_radians`] / [`to_degrees`] | Unit conversion |
//!
//! The random helpers draw from `fastrand`'s thread-local generator. Use the
//! `*_with_rng` variants with a seeded [`fastrand::Rng`] for reproducible output.

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG, TWOPI};
use crate::Vector3;

/// Saturates `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this does not panic when `min > max`; the result is
/// then `min`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Uniform random integer between `low` and `high`, both inclusive.
///
/// The bounds may be given in either order.
pub fn rand_int(low: i64, high: i64) -> i64 {
    let (low, high) = ordered(low, high);
    fastrand::i64(low..=high)
}

/// Uniform random integer between `low` and `high` drawn from `rng`.
pub fn rand_int_with_rng(rng: &mut fastrand::Rng, low: i64, high: i64) -> i64 {
    let (low, high) = ordered(low, high);
    rng.i64(low..=high)
}

// `fastrand` panics on an empty range
#[inline]
fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Uniform random float in `[low, high)`.
pub fn rand_float(low: f64, high: f64) -> f64 {
    low + fastrand::f64() * (high - low)
}

/// Uniform random float in `[low, high)` drawn from `rng`.
pub fn rand_float_with_rng(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// Angle from `u` to `v`, signed by the reference direction `w`.
///
/// `a` and `b` are the radii of an ellipse along the sine and cosine
/// directions; pass `1.0, 1.0` for the ordinary circular angle. The sign is
/// negative when `w · (u × v) < 0`. With `two_pi` the result is folded into
/// `[0, 2π)`, otherwise it lies in `[-π, π]`.
///
/// Magnitudes below `1e-15` snap to exactly zero.
///
/// ```
/// use spatial_core::utils::signed_angle;
/// use spatial_core::Vector3;
/// use std::f64::consts::FRAC_PI_2;
///
/// let x = Vector3::x_axis();
/// let y = Vector3::y_axis();
/// let down = -Vector3::z_axis();
///
/// assert!((signed_angle(&x, &y, &Vector3::z_axis(), false, 1.0, 1.0) - FRAC_PI_2).abs() < 1e-15);
/// assert!((signed_angle(&x, &y, &down, false, 1.0, 1.0) + FRAC_PI_2).abs() < 1e-15);
/// ```
pub fn signed_angle(u: &Vector3, v: &Vector3, w: &Vector3, two_pi: bool, a: f64, b: f64) -> f64 {
    let norm = u.length() * v.length();
    let cross = u.cross(v);

    let sin = cross.length() / norm;
    let cos = u.dot(v) / norm;

    let mut angle = libm::atan2(a * sin, b * cos);
    if angle.abs() < 1e-15 {
        angle = 0.0;
    }

    if w.dot(&cross) < 0.0 {
        if two_pi {
            TWOPI - angle
        } else {
            -angle
        }
    } else {
        angle
    }
}
