//! 3x3 matrices and the matrix side of the rotation conversions.
//!
//! A [`Matrix3`] is either a general linear map or, most of the time in this
//! crate, a rotation: an orthonormal matrix with determinant +1. Rotation
//! matrices are the hub of the conversion graph. Euler angles are extracted
//! from a matrix, quaternions are converted through the trace method, and
//! axis-angle pairs are expanded with the Rodrigues formula.
//!
//! # Storage Layout
//!
//! Elements are stored in row-major order as `[[f64; 3]; 3]`. The conversion
//! formulas name elements `m11`…`m33` (1-based, row then column); the
//! [`m11`](Matrix3::m11)…[`m33`](Matrix3::m33) getters expose those names,
//! while `matrix[(i, j)]` and [`get`](Matrix3::get) use 0-based indices.
//!
//! ```text
//! | m11 m12 m13 |   | x |   | m11*x + m12*y + m13*z |
//! | m21 m22 m23 | * | y | = | m21*x + m22*y + m23*z |
//! | m31 m32 m33 |   | z |   | m31*x + m32*y + m33*z |
//! ```
//!
//! # Rotation Convention
//!
//! Rotations are active and right-handed: a positive rotation of 90 degrees
//! about Z takes `[1, 0, 0]` to `[0, 1, 0]`.
//!
//! ```
//! use spatial_core::{AxisAngle, Matrix3, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let m = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), FRAC_PI_2));
//! let v = m * Vector3::x_axis();
//! assert!(v.approx_eq(&Vector3::y_axis(), 1e-15));
//! ```
//!
//! # Composing Rotations
//!
//! Rotation matrices compose by multiplication. To apply rotation A, then
//! rotation B, compute `B * A`: the rightmost matrix acts first.
//!
//! # Inverting Rotations
//!
//! For a proper rotation matrix the inverse equals the transpose, which is
//! cheaper and numerically stable. [`inverse`](Matrix3::inverse) is the general
//! cofactor inverse and returns `None` for singular matrices.

use crate::constants::EULER_POLE_PRECISION;
use crate::{AxisAngle, Euler, EulerOrder, Quaternion, SpatialError, SpatialResult, Vector3};
use std::fmt;

/// A 3x3 matrix with row-major storage.
///
/// # Construction
///
/// ```
/// use spatial_core::{Euler, EulerOrder, Matrix3};
///
/// let m = Matrix3::from_array([
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ]);
/// assert_eq!(m, Matrix3::identity());
///
/// let r = Matrix3::from_euler(&Euler::new(0.1, 0.2, 0.3, EulerOrder::ZYX));
/// assert!(r.is_rotation_matrix(1e-14));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")
)]
pub struct Matrix3 {
    elements: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    /// Creates the 3x3 identity matrix.
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn zeros() -> Self {
        Self {
            elements: [[0.0; 3]; 3],
        }
    }

    /// Creates a matrix from row-major nested arrays: `elements[i][j]` is
    /// row `i`, column `j`.
    ///
    /// This does not validate that the matrix is a proper rotation. Use
    /// [`is_rotation_matrix`](Self::is_rotation_matrix) to check if needed.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Creates a matrix from nine values listed row by row
    /// (`m11, m12, m13, m21, …, m33`).
    pub fn from_row_major(values: [f64; 9]) -> Self {
        Self::from_array([
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
            [values[6], values[7], values[8]],
        ])
    }

    /// Returns the element at the 0-based `row` and `col`.
    ///
    /// Use `matrix[(row, col)]` for the panicking form.
    pub fn get(&self, row: usize, col: usize) -> SpatialResult<f64> {
        Self::check_index(row)?;
        Self::check_index(col)?;
        Ok(self.elements[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> SpatialResult<()> {
        Self::check_index(row)?;
        Self::check_index(col)?;
        self.elements[row][col] = value;
        Ok(())
    }

    fn check_index(index: usize) -> SpatialResult<()> {
        if index < 3 {
            Ok(())
        } else {
            Err(SpatialError::index_out_of_bounds("Matrix3", index, 3))
        }
    }

    /// Returns a reference to the underlying row-major array.
    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    #[inline]
    pub fn m11(&self) -> f64 {
        self.elements[0][0]
    }

    #[inline]
    pub fn m12(&self) -> f64 {
        self.elements[0][1]
    }

    #[inline]
    pub fn m13(&self) -> f64 {
        self.elements[0][2]
    }

    #[inline]
    pub fn m21(&self) -> f64 {
        self.elements[1][0]
    }

    #[inline]
    pub fn m22(&self) -> f64 {
        self.elements[1][1]
    }

    #[inline]
    pub fn m23(&self) -> f64 {
        self.elements[1][2]
    }

    #[inline]
    pub fn m31(&self) -> f64 {
        self.elements[2][0]
    }

    #[inline]
    pub fn m32(&self) -> f64 {
        self.elements[2][1]
    }

    #[inline]
    pub fn m33(&self) -> f64 {
        self.elements[2][2]
    }

    pub fn row(&self, index: usize) -> SpatialResult<Vector3> {
        Self::check_index(index)?;
        Ok(Vector3::from_array(self.elements[index]))
    }

    pub fn column(&self, index: usize) -> SpatialResult<Vector3> {
        Self::check_index(index)?;
        let m = &self.elements;
        Ok(Vector3::new(m[0][index], m[1][index], m[2][index]))
    }

    pub fn set_row(&mut self, index: usize, row: &Vector3) -> SpatialResult<()> {
        Self::check_index(index)?;
        self.elements[index] = row.to_array();
        Ok(())
    }

    pub fn set_column(&mut self, index: usize, column: &Vector3) -> SpatialResult<()> {
        Self::check_index(index)?;
        for (row, value) in self.elements.iter_mut().zip(column.to_array()) {
            row[index] = value;
        }
        Ok(())
    }

    /// Multiplies this matrix by another, returning `self * other`.
    ///
    /// As a composition of rotations, `other` is applied first, then `self`.
    /// You can also use the `*` operator: `a * b` or `&a * &b`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    /// `other * self`.
    pub fn premultiply(&self, other: &Self) -> Self {
        other.multiply(self)
    }

    fn apply_to_vector(&self, v: &Vector3) -> Vector3 {
        let m = &self.elements;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Computes the determinant.
    ///
    /// A proper rotation has determinant +1; -1 indicates a reflection.
    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// General inverse via the adjugate, or `None` when the determinant is
    /// exactly zero.
    ///
    /// ```
    /// use spatial_core::Matrix3;
    ///
    /// let m = Matrix3::from_array([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]);
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(inv[(1, 1)], 0.25);
    ///
    /// assert!(Matrix3::zeros().inverse().is_none());
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;
        let m = &self.elements;

        Some(Self::from_array([
            [
                inv * (m[1][1] * m[2][2] - m[1][2] * m[2][1]),
                inv * (m[0][2] * m[2][1] - m[0][1] * m[2][2]),
                inv * (m[0][1] * m[1][2] - m[0][2] * m[1][1]),
            ],
            [
                inv * (m[1][2] * m[2][0] - m[1][0] * m[2][2]),
                inv * (m[0][0] * m[2][2] - m[0][2] * m[2][0]),
                inv * (m[0][2] * m[1][0] - m[0][0] * m[1][2]),
            ],
            [
                inv * (m[1][0] * m[2][1] - m[1][1] * m[2][0]),
                inv * (m[0][1] * m[2][0] - m[0][0] * m[2][1]),
                inv * (m[0][0] * m[1][1] - m[0][1] * m[1][0]),
            ],
        ]))
    }

    /// Returns the transpose. For a rotation matrix this is the inverse.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::from_array([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn trace(&self) -> f64 {
        self.elements[0][0] + self.elements[1][1] + self.elements[2][2]
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::from_array(self.elements.map(|row| row.map(&f)))
    }

    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|e| e * scalar)
    }

    /// `true` when every element differs from `other`'s by less than `precision`.
    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.max_difference(other) < precision
    }

    /// Checks whether this matrix is a proper rotation within `tolerance`:
    /// determinant +1 and `M * Mᵀ = I`.
    ///
    /// ```
    /// use spatial_core::Matrix3;
    ///
    /// let scaled = Matrix3::from_array([
    ///     [2.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// assert!(!scaled.is_rotation_matrix(1e-14));
    /// ```
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        let det = self.determinant();
        if (det - 1.0).abs() > tolerance {
            return false;
        }

        let product = self.multiply(&self.transpose());
        product.max_difference(&Self::identity()) <= tolerance
    }

    /// Returns the maximum absolute difference between corresponding elements.
    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;

        for i in 0..3 {
            for j in 0..3 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    /// Elements row by row.
    pub fn to_array(&self) -> [f64; 9] {
        let m = &self.elements;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        ]
    }

    /// Rotation matrix of a unit quaternion.
    ///
    /// Closed form on doubled products; the quaternion is not normalized here.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;

        let (xx, xy, xz) = (q.x * x2, q.x * y2, q.x * z2);
        let (yy, yz, zz) = (q.y * y2, q.y * z2, q.z * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self::from_array([
            [1.0 - (yy + zz), xy - wz, xz + wy],
            [xy + wz, 1.0 - (xx + zz), yz - wx],
            [xz - wy, yz + wx, 1.0 - (xx + yy)],
        ])
    }

    /// Rotation about `axis_angle.axis` (normalized first) by `axis_angle.angle`.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        let axis = axis_angle.axis.normalize();
        rodrigues(&axis, axis_angle.angle)
    }

    /// Rotation matrix of Euler angles in their own axis order.
    ///
    /// Each order has its own closed form of the three elementary rotations
    /// applied in that order.
    pub fn from_euler(euler: &Euler) -> Self {
        let (sx, cx) = libm::sincos(euler.x);
        let (sy, cy) = libm::sincos(euler.y);
        let (sz, cz) = libm::sincos(euler.z);

        let m = match euler.order {
            EulerOrder::XYZ => {
                let (cxcz, cxsz, sxcz, sxsz) = (cx * cz, cx * sz, sx * cz, sx * sz);
                [
                    [cy * cz, -cy * sz, sy],
                    [cxsz + sxcz * sy, cxcz - sxsz * sy, -sx * cy],
                    [sxsz - cxcz * sy, sxcz + cxsz * sy, cx * cy],
                ]
            }
            EulerOrder::YXZ => {
                let (cycz, cysz, sycz, sysz) = (cy * cz, cy * sz, sy * cz, sy * sz);
                [
                    [cycz + sysz * sx, sycz * sx - cysz, cx * sy],
                    [cx * sz, cx * cz, -sx],
                    [cysz * sx - sycz, sysz + cycz * sx, cx * cy],
                ]
            }
            EulerOrder::ZXY => {
                let (cycz, cysz, sycz, sysz) = (cy * cz, cy * sz, sy * cz, sy * sz);
                [
                    [cycz - sysz * sx, -cx * sz, sycz + cysz * sx],
                    [cysz + sycz * sx, cx * cz, sysz - cycz * sx],
                    [-cx * sy, sx, cx * cy],
                ]
            }
            EulerOrder::ZYX => {
                let (cxcz, cxsz, sxcz, sxsz) = (cx * cz, cx * sz, sx * cz, sx * sz);
                [
                    [cy * cz, sxcz * sy - cxsz, cxcz * sy + sxsz],
                    [cy * sz, sxsz * sy + cxcz, cxsz * sy - sxcz],
                    [-sy, sx * cy, cx * cy],
                ]
            }
            EulerOrder::YZX => {
                let (cxcy, cxsy, sxcy, sxsy) = (cx * cy, cx * sy, sx * cy, sx * sy);
                [
                    [cy * cz, sxsy - cxcy * sz, sxcy * sz + cxsy],
                    [sz, cx * cz, -sx * cz],
                    [-sy * cz, cxsy * sz + sxcy, cxcy - sxsy * sz],
                ]
            }
            EulerOrder::XZY => {
                let (cxcy, cxsy, sxcy, sxsy) = (cx * cy, cx * sy, sx * cy, sx * sy);
                [
                    [cy * cz, -sz, sy * cz],
                    [cxcy * sz + sxsy, cx * cz, cxsy * sz - sxcy],
                    [sxcy * sz - cxsy, sx * cz, sxsy * sz + cxcy],
                ]
            }
        };

        Self::from_array(m)
    }

    /// Euler angles in `order`, with the default pole precision.
    pub fn to_euler(&self, order: EulerOrder) -> Euler {
        Euler::from_matrix_with_precision(self, order, EULER_POLE_PRECISION)
    }

    pub fn to_euler_with_precision(&self, order: EulerOrder, precision: f64) -> Euler {
        Euler::from_matrix_with_precision(self, order, precision)
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_matrix(self)
    }
}

/// Rodrigues rotation about `axis` as given (no normalization).
pub(crate) fn rodrigues(axis: &Vector3, angle: f64) -> Matrix3 {
    let Vector3 { x, y, z } = *axis;
    let (s, c) = libm::sincos(angle);
    let cc = 1.0 - c;
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (xs, ys, zs) = (x * s, y * s, z * s);

    Matrix3::from_array([
        [x * x * cc + c, xy * cc - zs, xz * cc + ys],
        [xy * cc + zs, y * y * cc + c, yz * cc - xs],
        [xz * cc - ys, yz * cc + xs, z * z * cc + c],
    ])
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(elements: [[f64; 3]; 3]) -> Self {
        Self::from_array(elements)
    }
}

impl From<Matrix3> for [[f64; 3]; 3] {
    fn from(m: Matrix3) -> Self {
        m.elements
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix3> for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::MulAssign for Matrix3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl std::ops::Add for Matrix3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = self.elements;
        for (row, other) in result.iter_mut().zip(rhs.elements) {
            for (cell, value) in row.iter_mut().zip(other) {
                *cell += value;
            }
        }
        Self::from_array(result)
    }
}

impl std::ops::Sub for Matrix3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.scale(-1.0)
    }
}

impl std::ops::Mul<f64> for Matrix3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl std::ops::Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply_to_vector(&vec)
    }
}

impl std::ops::Mul<Vector3> for &Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply_to_vector(&vec)
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EPSILON, HALF_PI};

    #[test]
    fn test_identity_and_get() {
        let m = Matrix3::identity();
        assert_eq!(m.get(0, 0).unwrap(), 1.0);
        assert_eq!(m.get(1, 1).unwrap(), 1.0);
        assert_eq!(m.get(2, 2).unwrap(), 1.0);
        assert_eq!(m.get(0, 1).unwrap(), 0.0);
        assert_eq!(Matrix3::default(), m);
    }

    #[test]
    fn test_checked_access() {
        let mut m = Matrix3::identity();
        m.set(0, 1, 0.5).unwrap();
        assert_eq!(m.m12(), 0.5);

        let err = m.get(3, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Matrix3 index 3 out of bounds (valid range: 0-2)"
        );
        assert!(m.set(0, 7, 1.0).is_err());
        assert!(m.row(3).is_err());
        assert!(m.column(5).is_err());
    }

    #[test]
    fn test_named_getters_follow_row_major_layout() {
        let m = Matrix3::from_row_major([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(
            [m.m11(), m.m12(), m.m13(), m.m21(), m.m22(), m.m23(), m.m31(), m.m32(), m.m33()],
            m.to_array()
        );
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.trace(), 15.0);
    }

    #[test]
    fn test_rows_and_columns() {
        let mut m = Matrix3::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.row(1).unwrap(), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(m.column(2).unwrap(), Vector3::new(3.0, 6.0, 9.0));

        m.set_row(0, &Vector3::new(0.0, 0.0, 0.0)).unwrap();
        m.set_column(0, &Vector3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(
            m,
            Matrix3::from_array([[1.0, 0.0, 0.0], [1.0, 5.0, 6.0], [1.0, 8.0, 9.0]])
        );
    }

    #[test]
    fn test_determinant_and_inverse() {
        let m = Matrix3::from_array([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
        assert_eq!(m.determinant(), 6.0);

        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Matrix3::identity(), 1e-12));
        assert!((inv * m).approx_eq(&Matrix3::identity(), 1e-12));
    }

    #[test]
    fn test_singular_inverse_is_none() {
        let m = Matrix3::from_array([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_transpose_is_inverse_for_rotation() {
        let m = Matrix3::from_euler(&Euler::new(0.5, -0.3, 1.2, EulerOrder::XYZ));
        let product = m * m.transpose();
        assert!(product.approx_eq(&Matrix3::identity(), 1e-14));
    }

    #[test]
    fn test_is_rotation_matrix_valid() {
        let m = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::new(1.0, 2.0, 3.0), 0.7));
        assert!(m.is_rotation_matrix(1e-14));
    }

    #[test]
    fn test_is_rotation_matrix_bad_determinant() {
        let m = Matrix3::from_array([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!m.is_rotation_matrix(1e-15));
    }

    #[test]
    fn test_is_rotation_matrix_not_orthogonal() {
        let m = Matrix3::from_array([[1.0, 0.1, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!m.is_rotation_matrix(1e-15));
    }

    #[test]
    fn test_reflection_is_not_rotation() {
        let m = Matrix3::from_array([[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!m.is_rotation_matrix(1e-15));
    }

    #[test]
    fn test_from_quaternion_identity_is_exact() {
        assert_eq!(
            Matrix3::from_quaternion(&Quaternion::identity()),
            Matrix3::identity()
        );
    }

    #[test]
    fn test_from_quaternion_quarter_turn_about_z() {
        let (s, c) = libm::sincos(HALF_PI / 2.0);
        let q = Quaternion::new(0.0, 0.0, s, c);
        let m = Matrix3::from_quaternion(&q);
        let expected = Matrix3::from_array([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(m.approx_eq(&expected, 1e-15));
    }

    #[test]
    fn test_axis_angle_normalizes_axis() {
        let a = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::new(0.0, 0.0, 5.0), HALF_PI));
        let v = a * Vector3::x_axis();
        assert!(v.approx_eq(&Vector3::y_axis(), 1e-15));
    }

    #[test]
    fn test_from_euler_single_axis() {
        // with one non-zero angle every order reduces to an elementary rotation
        let orders = [
            EulerOrder::XYZ,
            EulerOrder::XZY,
            EulerOrder::YXZ,
            EulerOrder::YZX,
            EulerOrder::ZXY,
            EulerOrder::ZYX,
        ];
        let rx = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::x_axis(), 0.4));
        let ry = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::y_axis(), 0.4));
        let rz = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), 0.4));
        for order in orders {
            assert!(Matrix3::from_euler(&Euler::new(0.4, 0.0, 0.0, order)).approx_eq(&rx, 1e-15));
            assert!(Matrix3::from_euler(&Euler::new(0.0, 0.4, 0.0, order)).approx_eq(&ry, 1e-15));
            assert!(Matrix3::from_euler(&Euler::new(0.0, 0.0, 0.4, order)).approx_eq(&rz, 1e-15));
        }
    }

    #[test]
    fn test_from_euler_matches_elementary_product() {
        let (x, y, z) = (0.3, -0.7, 1.1);
        let rx = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::x_axis(), x));
        let ry = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::y_axis(), y));
        let rz = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), z));

        let cases = [
            (EulerOrder::XYZ, rx * ry * rz),
            (EulerOrder::XZY, rx * rz * ry),
            (EulerOrder::YXZ, ry * rx * rz),
            (EulerOrder::YZX, ry * rz * rx),
            (EulerOrder::ZXY, rz * rx * ry),
            (EulerOrder::ZYX, rz * ry * rx),
        ];
        for (order, expected) in cases {
            let m = Matrix3::from_euler(&Euler::new(x, y, z, order));
            assert!(m.approx_eq(&expected, 1e-14), "order {}", order);
        }
    }

    #[test]
    fn test_to_euler_delegates_with_precision() {
        let e = Euler::new(0.1, 0.2, 0.3, EulerOrder::YZX);
        let m = Matrix3::from_euler(&e);
        assert!(m.to_euler(EulerOrder::YZX).approx_eq(&e, 1e-12));
        assert!(m
            .to_euler_with_precision(EulerOrder::YZX, EPSILON)
            .approx_eq(&e, 1e-12));
    }

    #[test]
    fn test_mul_matrix_matrix() {
        let a = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::x_axis(), 0.1));
        let b = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::y_axis(), 0.2));

        let r1 = a * b;
        let r2 = a * &b;
        let r3 = &a * b;
        let r4 = &a * &b;

        assert_eq!(r1, r2);
        assert_eq!(r2, r3);
        assert_eq!(r3, r4);
        assert_eq!(b.premultiply(&a), r1);

        let mut c = a;
        c *= b;
        assert_eq!(c, r1);
    }

    #[test]
    fn test_elementwise_ops() {
        let a = Matrix3::identity();
        assert_eq!((a + a).trace(), 6.0);
        assert_eq!(a - a, Matrix3::zeros());
        assert_eq!(a * 3.0, a.scale(3.0));
        assert_eq!(a.map(|e| e + 1.0)[(0, 1)], 1.0);
    }

    #[test]
    fn test_index_operators() {
        let mut m = Matrix3::identity();
        assert_eq!(m[(0, 0)], 1.0);
        m[(0, 1)] = 0.5;
        assert_eq!(m[(0, 1)], 0.5);
    }

    #[test]
    fn test_mul_matrix_vector() {
        let m = Matrix3::identity();
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m * v, v);
        assert_eq!(&m * v, v);
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Matrix3::identity());
        assert!(s.contains("Matrix3:"));
        assert!(s.contains("["));
    }

    #[test]
    fn test_max_difference() {
        let a = Matrix3::identity();
        let b = Matrix3::from_array([[1.0, 0.1, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!((a.max_difference(&b) - 0.1).abs() < 1e-15);
        assert!(!a.approx_eq(&b, 0.1));
        assert!(a.approx_eq(&b, 0.11));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_nested_rows() {
        let m = Matrix3::identity();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]");
        let back: Matrix3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
