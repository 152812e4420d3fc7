//! Unit quaternions as rotations.
//!
//! A [`Quaternion`] `x·i + y·j + z·k + w` with unit length represents a
//! rotation of angle `θ` about the unit axis `n` as
//! `(n·sin(θ/2), cos(θ/2))`. The representation is a double cover: `q` and
//! `-q` describe the same rotation. Code that compares rotations (rather than
//! quaternions) should use [`is_same_rotation`](Quaternion::is_same_rotation).
//!
//! # Conventions
//!
//! - Components are stored `x, y, z, w` with the real part last.
//! - [`multiply`](Quaternion::multiply) is the Hamilton product `self * other`;
//!   as rotations, `other` is applied first.
//! - Rotation operations assume a unit quaternion. Normalization is not
//!   enforced; call [`normalize`](Quaternion::normalize) after accumulating
//!   products.
//!
//! ```
//! use spatial_core::{AxisAngle, Quaternion, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), FRAC_PI_2));
//! let v = q.rotate_vector(&Vector3::x_axis());
//! assert!(v.approx_eq(&Vector3::y_axis(), 1e-15));
//! ```
//!
//! # Degenerate Inputs
//!
//! Nothing here returns an error. Normalizing a quaternion shorter than the
//! precision yields the identity, and [`from_two_vectors`](Quaternion::from_two_vectors)
//! with opposite vectors picks a half-turn about some axis orthogonal to the
//! input. Both fallbacks emit a `trace` log record.

use crate::constants::EPSILON;
use crate::{AxisAngle, Euler, EulerOrder, Matrix3, Vector3};
use std::fmt;

/// A quaternion `(x, y, z, w)` with the real part `w` last.
///
/// `Default` is the identity rotation `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Real part 1, imaginary part 0.
    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        libm::sqrt(self.length_squared())
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// `(-x, -y, -z, w)`; the inverse rotation of a unit quaternion.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Hamilton product `self * other`.
    ///
    /// As rotations, `other` is applied first, then `self`. Also available as
    /// the `*` operator.
    pub fn multiply(&self, other: &Self) -> Self {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        Self::new(
            x * other.w + y * other.z - z * other.y + w * other.x,
            -x * other.z + y * other.w + z * other.x + w * other.y,
            x * other.y - y * other.x + z * other.w + w * other.z,
            -x * other.x - y * other.y - z * other.z + w * other.w,
        )
    }

    /// Hamilton product `other * self`.
    pub fn premultiply(&self, other: &Self) -> Self {
        other.multiply(self)
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }

    /// Unit quaternion in the same direction, or the identity when the length
    /// is below [`EPSILON`].
    pub fn normalize(&self) -> Self {
        self.normalize_with_precision(EPSILON)
    }

    pub fn normalize_with_precision(&self, precision: f64) -> Self {
        let length = self.length();
        if length < precision {
            log::trace!(
                "quaternion length {:e} below {:e}, normalizing to identity",
                length,
                precision
            );
            return Self::identity();
        }
        self.scale(1.0 / length)
    }

    /// Component-wise comparison. See also
    /// [`is_same_rotation`](Self::is_same_rotation).
    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        (self.x - other.x).abs() < precision
            && (self.y - other.y).abs() < precision
            && (self.z - other.z).abs() < precision
            && (self.w - other.w).abs() < precision
    }

    /// `true` when `self` and `other` are within `precision` up to sign.
    pub fn is_same_rotation(&self, other: &Self, precision: f64) -> bool {
        self.approx_eq(other, precision) || self.approx_eq(&-*other, precision)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Spherical linear interpolation from `self` (`t = 0`) to `other`
    /// (`t = 1`) along the shorter arc.
    ///
    /// Both inputs are expected to be unit quaternions. `t` outside `[0, 1]`
    /// extrapolates. When the inputs are (anti)parallel the result is `self`;
    /// when they are nearly so, a normalized linear interpolation is used.
    ///
    /// ```
    /// use spatial_core::{AxisAngle, Quaternion, Vector3};
    ///
    /// let a = Quaternion::identity();
    /// let b = Quaternion::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), 1.0));
    /// let half = a.slerp(&b, 0.5);
    ///
    /// let expected = Quaternion::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), 0.5));
    /// assert!(half.approx_eq(&expected, 1e-14));
    /// ```
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }

        let mut cos_half_theta =
            self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z;
        let mut target = *other;

        if cos_half_theta < 0.0 {
            target = -target;
            cos_half_theta = -cos_half_theta;
        }

        if cos_half_theta >= 1.0 {
            return *self;
        }

        let sqr_sin_half_theta = 1.0 - cos_half_theta * cos_half_theta;

        if sqr_sin_half_theta <= f64::EPSILON {
            let s = 1.0 - t;
            return Self::new(
                s * self.x + t * target.x,
                s * self.y + t * target.y,
                s * self.z + t * target.z,
                s * self.w + t * target.w,
            )
            .normalize();
        }

        let sin_half_theta = libm::sqrt(sqr_sin_half_theta);
        let half_theta = libm::atan2(sin_half_theta, cos_half_theta);
        let ratio_a = libm::sin((1.0 - t) * half_theta) / sin_half_theta;
        let ratio_b = libm::sin(t * half_theta) / sin_half_theta;

        Self::new(
            self.x * ratio_a + target.x * ratio_b,
            self.y * ratio_a + target.y * ratio_b,
            self.z * ratio_a + target.z * ratio_b,
            self.w * ratio_a + target.w * ratio_b,
        )
    }

    /// Rotates `v` by this unit quaternion (`q v q*`, expanded).
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        // q * v
        let ix = w * v.x + y * v.z - z * v.y;
        let iy = w * v.y + z * v.x - x * v.z;
        let iz = w * v.z + x * v.y - y * v.x;
        let iw = x * v.x + y * v.y + z * v.z;

        // (q * v) * q^-1
        Vector3::new(
            ix * w + iw * x - iy * z + iz * y,
            iy * w + iw * y - iz * x + ix * z,
            iz * w + iw * z - ix * y + iy * x,
        )
    }

    /// The imaginary part `(x, y, z)`.
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Rotation matrix of this (unit) quaternion.
    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::from_quaternion(self)
    }

    /// XYZ Euler angles of this rotation.
    pub fn to_euler(&self) -> Euler {
        Euler::from_quaternion(self)
    }

    pub fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_quaternion(self)
    }

    /// Quaternion of Euler angles, from the half-angle product in the angles'
    /// own order.
    pub fn from_euler(euler: &Euler) -> Self {
        let (sx, cx) = libm::sincos(euler.x / 2.0);
        let (sy, cy) = libm::sincos(euler.y / 2.0);
        let (sz, cz) = libm::sincos(euler.z / 2.0);

        let (ccc, sss) = (cx * cy * cz, sx * sy * sz);
        let (scc, css) = (sx * cy * cz, cx * sy * sz);
        let (csc, scs) = (cx * sy * cz, sx * cy * sz);
        let (ccs, ssc) = (cx * cy * sz, sx * sy * cz);

        let (x, y, z, w) = match euler.order {
            EulerOrder::XYZ => (scc + css, csc - scs, ccs + ssc, ccc - sss),
            EulerOrder::YXZ => (scc + css, csc - scs, ccs - ssc, ccc + sss),
            EulerOrder::ZXY => (scc - css, csc + scs, ccs + ssc, ccc - sss),
            EulerOrder::ZYX => (scc - css, csc + scs, ccs - ssc, ccc + sss),
            EulerOrder::YZX => (scc + css, csc + scs, ccs - ssc, ccc - sss),
            EulerOrder::XZY => (scc - css, csc - scs, ccs + ssc, ccc + sss),
        };

        Self::new(x, y, z, w)
    }

    /// `(axis·sin(angle/2), cos(angle/2))`. The axis is used as given.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let (sin, cos) = libm::sincos(axis_angle.angle / 2.0);
        let axis = &axis_angle.axis;
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Unit quaternion of a rotation matrix by the trace method.
    ///
    /// When the trace is not positive the largest diagonal element selects
    /// which component is computed first, keeping the divisor away from zero.
    pub fn from_matrix(matrix: &Matrix3) -> Self {
        let m = matrix;
        let t = m.trace();

        if t > 0.0 {
            let s = 0.5 / libm::sqrt(t + 1.0);
            Self::new(
                (m.m32() - m.m23()) * s,
                (m.m13() - m.m31()) * s,
                (m.m21() - m.m12()) * s,
                0.25 / s,
            )
        } else if m.m11() > m.m22() && m.m11() > m.m33() {
            let s = 2.0 * libm::sqrt(1.0 + m.m11() - m.m22() - m.m33());
            Self::new(
                0.25 * s,
                (m.m12() + m.m21()) / s,
                (m.m13() + m.m31()) / s,
                (m.m32() - m.m23()) / s,
            )
        } else if m.m22() > m.m33() {
            let s = 2.0 * libm::sqrt(1.0 + m.m22() - m.m11() - m.m33());
            Self::new(
                (m.m12() + m.m21()) / s,
                0.25 * s,
                (m.m23() + m.m32()) / s,
                (m.m13() - m.m31()) / s,
            )
        } else {
            let s = 2.0 * libm::sqrt(1.0 + m.m33() - m.m11() - m.m22());
            Self::new(
                (m.m13() + m.m31()) / s,
                (m.m23() + m.m32()) / s,
                0.25 * s,
                (m.m21() - m.m12()) / s,
            )
        }
    }

    /// Shortest rotation taking the unit vector `from` onto the unit vector `to`.
    ///
    /// ```
    /// use spatial_core::{Quaternion, Vector3};
    ///
    /// let q = Quaternion::from_two_vectors(&Vector3::x_axis(), &Vector3::y_axis());
    /// let v = q.rotate_vector(&Vector3::x_axis());
    /// assert!(v.approx_eq(&Vector3::y_axis(), 1e-15));
    /// ```
    pub fn from_two_vectors(from: &Vector3, to: &Vector3) -> Self {
        Self::from_two_vectors_with_precision(from, to, EPSILON)
    }

    /// [`from_two_vectors`](Self::from_two_vectors) with an explicit threshold.
    ///
    /// The vectors count as opposite when `from · to + 1 < precision`; the
    /// threshold applies to that dot-product quantity, not to an angle.
    pub fn from_two_vectors_with_precision(from: &Vector3, to: &Vector3, precision: f64) -> Self {
        let w = from.dot(to) + 1.0;

        let q = if w < precision {
            log::trace!("opposite vectors in from_two_vectors, using a half-turn");
            if from.x.abs() > from.z.abs() {
                Self::new(-from.y, from.x, 0.0, 0.0)
            } else {
                Self::new(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let axis = from.cross(to);
            Self::new(axis.x, axis.y, axis.z, w)
        };

        q.normalize()
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Quaternion> for &Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: &Quaternion) -> Quaternion {
        self.multiply(rhs)
    }
}

impl std::ops::MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl std::ops::Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.rotate_vector(&vec)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({:.9}, {:.9}, {:.9}, {:.9})",
            self.x, self.y, self.z, self.w
        )
    }
}
