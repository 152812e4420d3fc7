//! Vectors, matrices and rotation representations for 3D geometry.
//!
//! `spatial-core` provides plain `f64` value types and the closed-form
//! conversions between rotation representations. Every type is `Copy`; every
//! operation returns a new value.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`vector`] | [`Vector2`], [`Vector3`], [`Vector4`] |
//! | [`matrix`] | [`Matrix2`], [`Matrix3`], [`Matrix4`] with row-major storage |
//! | [`rotation`] | [`Quaternion`], [`Euler`] with six [`EulerOrder`]s, [`AxisAngle`] |
//! | [`constants`] | Angular constants and default precisions |
//! | [`utils`] | Clamping, random numbers, degree/radian conversion |
//! | [`errors`] | [`SpatialError`] and [`SpatialResult`] |
//!
//! # Converting Between Rotations
//!
//! ```
//! use spatial_core::{Euler, EulerOrder, Matrix3, Quaternion, Vector3};
//!
//! let euler = Euler::new(0.1, 0.2, 0.3, EulerOrder::ZYX);
//! let q = Quaternion::from_euler(&euler);
//! let m = Matrix3::from_quaternion(&q);
//!
//! let back = Euler::from_matrix(&m, EulerOrder::ZYX);
//! assert!(back.approx_eq(&euler, 1e-12));
//!
//! let v = q.rotate_vector(&Vector3::x_axis());
//! assert!(v.approx_eq(&(m * Vector3::x_axis()), 1e-14));
//! ```
//!
//! # Re-exports
//!
//! Common types are re-exported at the crate root:
//!
//! ```
//! use spatial_core::{Vector2, Vector3, Vector4, Matrix2, Matrix3, Matrix4};
//! use spatial_core::{AxisAngle, Euler, EulerOrder, Quaternion};
//! use spatial_core::{MathErrorKind, SpatialError, SpatialResult};
//! ```
//!
//! # Design Notes
//!
//! - **Radians everywhere**: angles are radians; [`utils::to_degrees`] and
//!   [`utils::to_radians`] convert at the edges.
//!
//! - **Active, right-handed rotations**: a rotation matrix or quaternion turns
//!   vectors, not frames. Matrices multiply column vectors on the left.
//!
//! - **Fallbacks, not errors**: degenerate input (a zero quaternion, gimbal
//!   lock, antiparallel vectors) produces a documented value and a `trace`
//!   log record through the [`log`] facade.
//!
//! - **Per-operation precision**: each tolerance-based operation has a default
//!   threshold and a `_with_precision` variant; see [`constants`].

pub mod constants;
pub mod errors;
pub mod matrix;
pub mod rotation;
pub mod utils;
pub mod vector;

pub use errors::{MathErrorKind, SpatialError, SpatialResult};
pub use matrix::{Matrix2, Matrix3, Matrix4};
pub use rotation::{AxisAngle, Euler, EulerOrder, Quaternion};
pub use vector::{Vector2, Vector3, Vector4};

pub mod test_helpers;
