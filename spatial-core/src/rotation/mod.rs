//! Rotation representations and the conversions between them.
//!
//! | Type | Form | Conversions |
//! |------|------|-------------|
//! | [`Quaternion`] | unit `(x, y, z, w)` | matrix, Euler, axis-angle, two vectors |
//! | [`Euler`] | three angles + [`EulerOrder`] | matrix, quaternion, axis-angle |
//! | [`AxisAngle`] | axis + angle | quaternion, matrix |
//!
//! [`Matrix3`](crate::Matrix3) is the hub: Euler angles are always extracted
//! from a rotation matrix, whatever the source representation.

mod axis_angle;
mod euler;
mod quaternion;

pub use axis_angle::AxisAngle;
pub use euler::{Euler, EulerOrder};
pub use quaternion::Quaternion;
