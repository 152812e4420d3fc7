//! Euler angles with an explicit axis order.
//!
//! An [`Euler`] triple `(x, y, z)` is only meaningful together with its
//! [`EulerOrder`]: the order names the sequence in which the elementary
//! rotations are composed, so the same three angles describe six different
//! rotations. The order is part of the value, and two `Euler`s with equal
//! angles but different orders are not equal.
//!
//! # Extraction and Gimbal Lock
//!
//! [`Euler::from_matrix`] recovers the angles from a rotation matrix. The
//! middle rotation of the sequence is read directly from one matrix element
//! through `asin`; the outer two come from `atan2` of off-diagonal pairs.
//!
//! When the middle angle reaches ±90 degrees the two outer axes line up and
//! one degree of freedom is lost. In that case the angle of the last axis in
//! the sequence is set to zero and the first one absorbs the whole rotation
//! about the shared axis. The angle triple is then not unique, but the
//! rotation it describes is:
//!
//! ```
//! use spatial_core::{Euler, EulerOrder, Matrix3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let locked = Euler::new(0.3, FRAC_PI_2, 0.2, EulerOrder::XYZ);
//! let m = Matrix3::from_euler(&locked);
//!
//! let recovered = Euler::from_matrix(&m, EulerOrder::XYZ);
//! assert_eq!(recovered.z, 0.0);
//! assert!(recovered.to_matrix().approx_eq(&m, 1e-12));
//! ```
//!
//! # Orders as Values
//!
//! [`EulerOrder`] is a closed enum. Orders arriving as numbers or text are
//! converted at the boundary, and unknown values are rejected there:
//!
//! ```
//! use spatial_core::EulerOrder;
//!
//! assert_eq!("zyx".parse::<EulerOrder>().unwrap(), EulerOrder::ZYX);
//! assert_eq!(EulerOrder::try_from(2u8).unwrap(), EulerOrder::YXZ);
//! assert!("XYX".parse::<EulerOrder>().is_err());
//! ```

use crate::constants::EULER_POLE_PRECISION;
use crate::utils::clamp;
use crate::{AxisAngle, Matrix3, Quaternion, SpatialError, Vector3};
use std::fmt;
use std::str::FromStr;

/// Sequence of elementary rotations composed by an [`Euler`] triple.
///
/// `XYZ` means the matrix is `Rx * Ry * Rz`. The discriminants follow the
/// conventional numbering `0..=5` used by [`TryFrom<u8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl EulerOrder {
    /// All six orders in discriminant order.
    pub const ALL: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::XZY,
        EulerOrder::YXZ,
        EulerOrder::YZX,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EulerOrder::XYZ => "XYZ",
            EulerOrder::XZY => "XZY",
            EulerOrder::YXZ => "YXZ",
            EulerOrder::YZX => "YZX",
            EulerOrder::ZXY => "ZXY",
            EulerOrder::ZYX => "ZYX",
        }
    }
}

impl TryFrom<u8> for EulerOrder {
    type Error = SpatialError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| SpatialError::unknown_euler_order(value))
    }
}

impl From<EulerOrder> for u8 {
    fn from(order: EulerOrder) -> Self {
        order as u8
    }
}

impl FromStr for EulerOrder {
    type Err = SpatialError;

    /// Case-insensitive axis letters, e.g. `"XYZ"` or `"zyx"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == upper)
            .ok_or_else(|| SpatialError::unknown_euler_order(s))
    }
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three rotation angles in radians applied in `order`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub order: EulerOrder,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Extracts the angles of `matrix` in `order`, treating the middle angle
    /// as locked when its sine is exactly ±1 or exceeds 1 in magnitude by at
    /// least [`EULER_POLE_PRECISION`].
    ///
    /// Sines just short of ±1 stay in the regular branch, so matrices close to
    /// (but not at) the pole keep both outer angles.
    ///
    /// `matrix` is assumed to be an unscaled rotation.
    pub fn from_matrix(matrix: &Matrix3, order: EulerOrder) -> Self {
        Self::from_matrix_with_precision(matrix, order, EULER_POLE_PRECISION)
    }

    /// [`from_matrix`](Self::from_matrix) with an explicit pole threshold.
    pub fn from_matrix_with_precision(matrix: &Matrix3, order: EulerOrder, precision: f64) -> Self {
        let m = matrix;
        // an exact ±1 is the pole itself; `precision` admits elements that
        // drifted just past ±1 into the regular branch
        let regular = |sine: f64| {
            let magnitude = sine.abs();
            magnitude - precision < 1.0 && magnitude != 1.0
        };
        let (x, y, z, locked) = match order {
            EulerOrder::XYZ => {
                let y = libm::asin(clamp(m.m13(), -1.0, 1.0));
                if regular(m.m13()) {
                    let x = libm::atan2(-m.m23(), m.m33());
                    let z = libm::atan2(-m.m12(), m.m11());
                    (x, y, z, false)
                } else {
                    (libm::atan2(m.m32(), m.m22()), y, 0.0, true)
                }
            }
            EulerOrder::YXZ => {
                let x = libm::asin(-clamp(m.m23(), -1.0, 1.0));
                if regular(m.m23()) {
                    let y = libm::atan2(m.m13(), m.m33());
                    let z = libm::atan2(m.m21(), m.m22());
                    (x, y, z, false)
                } else {
                    (x, libm::atan2(-m.m31(), m.m11()), 0.0, true)
                }
            }
            EulerOrder::ZXY => {
                let x = libm::asin(clamp(m.m32(), -1.0, 1.0));
                if regular(m.m32()) {
                    let y = libm::atan2(-m.m31(), m.m33());
                    let z = libm::atan2(-m.m12(), m.m22());
                    (x, y, z, false)
                } else {
                    (x, 0.0, libm::atan2(m.m21(), m.m11()), true)
                }
            }
            EulerOrder::ZYX => {
                let y = libm::asin(-clamp(m.m31(), -1.0, 1.0));
                if regular(m.m31()) {
                    let x = libm::atan2(m.m32(), m.m33());
                    let z = libm::atan2(m.m21(), m.m11());
                    (x, y, z, false)
                } else {
                    (0.0, y, libm::atan2(-m.m12(), m.m22()), true)
                }
            }
            EulerOrder::YZX => {
                let z = libm::asin(clamp(m.m21(), -1.0, 1.0));
                if regular(m.m21()) {
                    let x = libm::atan2(-m.m23(), m.m22());
                    let y = libm::atan2(-m.m31(), m.m11());
                    (x, y, z, false)
                } else {
                    (0.0, libm::atan2(m.m13(), m.m33()), z, true)
                }
            }
            EulerOrder::XZY => {
                let z = libm::asin(-clamp(m.m12(), -1.0, 1.0));
                if regular(m.m12()) {
                    let x = libm::atan2(m.m32(), m.m22());
                    let y = libm::atan2(m.m13(), m.m11());
                    (x, y, z, false)
                } else {
                    (libm::atan2(-m.m23(), m.m33()), 0.0, z, true)
                }
            }
        };

        if locked {
            log::trace!("Euler {} extraction at gimbal lock, one outer angle set to 0", order);
        }

        Self::new(x, y, z, order)
    }

    /// XYZ angles of a unit quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_matrix(&Matrix3::from_quaternion(q), EulerOrder::XYZ)
    }

    /// XYZ angles of an axis-angle rotation.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        Self::from_matrix(&Matrix3::from_axis_angle(axis_angle), EulerOrder::XYZ)
    }

    /// Reads the angles from the components of `v`.
    pub fn from_vector3(v: &Vector3, order: EulerOrder) -> Self {
        Self::new(v.x, v.y, v.z, order)
    }

    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::from_euler(self)
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(self)
    }

    /// Same order and every angle within `precision`.
    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.order == other.order
            && (self.x - other.x).abs() < precision
            && (self.y - other.y).abs() < precision
            && (self.z - other.z).abs() < precision
    }
}

impl fmt::Display for Euler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Euler({:.9}, {:.9}, {:.9}, {})",
            self.x, self.y, self.z, self.order
        )
    }
}
