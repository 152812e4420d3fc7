//! Error types for vector, matrix and rotation operations.
//!
//! Almost everything in this crate is total: degenerate geometry (a zero-length
//! quaternion, gimbal lock, antiparallel vectors) resolves to a documented
//! fallback value instead of an error. [`SpatialError`] covers the remaining
//! failure modes:
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`UnknownEulerOrder`](SpatialError::UnknownEulerOrder) | `EulerOrder::try_from(u8)`, `"xyz".parse::<EulerOrder>()` |
//! | [`IndexOutOfBounds`](SpatialError::IndexOutOfBounds) | checked `get`/`set`/`row`/`column` accessors |
//! | [`MathError`](SpatialError::MathError) | checked numerical helpers such as `Vector3::try_normalize` |
//!
//! Non-invertible matrices are not errors either: `inverse()` returns `None`
//! so callers can branch on invertibility directly.
//!
//! ```
//! use spatial_core::{EulerOrder, SpatialError};
//!
//! let err = EulerOrder::try_from(9u8).unwrap_err();
//! assert!(matches!(err, SpatialError::UnknownEulerOrder { .. }));
//! assert_eq!(err.to_string(), "Unknown Euler order 9");
//! ```

use thiserror::Error;

/// Classification of numerical failures reported through
/// [`SpatialError::MathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Attempted division by zero or near-zero value.
    DivisionByZero,
    /// Result is NaN or infinity.
    NotFinite,
}

/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// An Euler axis order outside the six supported permutations.
    #[error("Unknown Euler order {value}")]
    UnknownEulerOrder { value: String },

    /// Component, row or column index past the end of a fixed-size type.
    #[error("{type_name} index {index} out of bounds (valid range: 0-{max})")]
    IndexOutOfBounds {
        type_name: &'static str,
        index: usize,
        max: usize,
    },

    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

/// Convenience alias for `Result<T, SpatialError>`.
pub type SpatialResult<T> = Result<T, SpatialError>;

impl SpatialError {
    /// Creates an [`UnknownEulerOrder`](Self::UnknownEulerOrder) error.
    pub fn unknown_euler_order(value: impl ToString) -> Self {
        Self::UnknownEulerOrder {
            value: value.to_string(),
        }
    }

    /// Creates an [`IndexOutOfBounds`](Self::IndexOutOfBounds) error.
    ///
    /// `len` is the number of valid indices; the message reports `0..=len-1`.
    pub fn index_out_of_bounds(type_name: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            type_name,
            index,
            max: len.saturating_sub(1),
        }
    }

    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }
}
