//! Axis-angle rotations.
//!
//! [`AxisAngle`] is the most readable rotation form and the least convenient
//! to compose; it converts through [`Quaternion`] or [`Matrix3`] for any real
//! work. Going back from a quaternion loses the axis when the angle is near
//! zero, and the x axis is substituted (with a `trace` log record).
//!
//! ```
//! use spatial_core::{AxisAngle, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let quarter = AxisAngle::new(Vector3::z_axis(), FRAC_PI_2);
//! let v = quarter.to_matrix() * Vector3::x_axis();
//! assert!(v.approx_eq(&Vector3::y_axis(), 1e-15));
//! ```

use crate::constants::EPSILON;
use crate::{Matrix3, Quaternion, Vector3};
use std::fmt;

/// A rotation of `angle` radians about `axis`.
///
/// The axis is expected to be unit length but is stored as given;
/// [`Quaternion::from_axis_angle`] uses it unchanged while
/// [`Matrix3::from_axis_angle`] normalizes it first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisAngle {
    pub axis: Vector3,
    pub angle: f64,
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::new(Vector3::x_axis(), 0.0)
    }
}

impl AxisAngle {
    pub fn new(axis: Vector3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Axis and angle of a quaternion, with the angle in `[0, 2π]`.
    ///
    /// A quaternion with `w > 1` is normalized first. Near the identity the
    /// axis is undefined and `(1, 0, 0)` is returned.
    ///
    /// ```
    /// use spatial_core::{AxisAngle, Quaternion, Vector3};
    ///
    /// let aa = AxisAngle::from_quaternion(&Quaternion::identity());
    /// assert_eq!(aa.axis, Vector3::x_axis());
    /// assert_eq!(aa.angle, 0.0);
    /// ```
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_quaternion_with_precision(q, EPSILON)
    }

    /// [`from_quaternion`](Self::from_quaternion) with an explicit threshold on
    /// `sin(angle/2)` below which the axis falls back to `(1, 0, 0)`.
    pub fn from_quaternion_with_precision(q: &Quaternion, precision: f64) -> Self {
        let q = if q.w > 1.0 { q.normalize() } else { *q };

        let angle = 2.0 * libm::acos(q.w);
        let s = libm::sqrt(1.0 - q.w * q.w);

        let axis = if s > precision {
            Vector3::new(q.x / s, q.y / s, q.z / s)
        } else {
            log::trace!("rotation angle {:e} too small for an axis, using x", angle);
            Vector3::x_axis()
        };

        Self::new(axis, angle)
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_axis_angle(self)
    }

    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::from_axis_angle(self)
    }

    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.axis.approx_eq(&other.axis, precision) && (self.angle - other.angle).abs() < precision
    }
}

impl From<Quaternion> for AxisAngle {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(&q)
    }
}

impl From<AxisAngle> for Quaternion {
    fn from(axis_angle: AxisAngle) -> Self {
        axis_angle.to_quaternion()
    }
}

impl fmt::Display for AxisAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisAngle({}, {:.9})", self.axis, self.angle)
    }
}
