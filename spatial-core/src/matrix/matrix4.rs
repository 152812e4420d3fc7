//! 4x4 matrices for homogeneous transforms.
//!
//! The upper-left 3x3 block holds rotation and scale, the fourth column holds
//! the translation, and the bottom row is the projective row (`0 0 0 1` for an
//! affine transform). Points are treated as column vectors `(x, y, z, 1)`.
//!
//! ```
//! use spatial_core::{Matrix4, Vector3};
//!
//! let m = Matrix4::identity()
//!     .set_scale(&Vector3::new(2.0, 2.0, 2.0))
//!     .set_translation(&Vector3::new(0.0, 0.0, 5.0));
//!
//! assert_eq!(m.transform_point(&Vector3::new(1.0, 1.0, 1.0)), Vector3::new(2.0, 2.0, 7.0));
//! ```

use crate::matrix::matrix3::rodrigues;
use crate::{Euler, Matrix3, SpatialError, SpatialResult, Vector3, Vector4};
use std::fmt;

/// A 4x4 matrix with row-major storage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[f64; 4]; 4]", into = "[[f64; 4]; 4]")
)]
pub struct Matrix4 {
    elements: [[f64; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub fn identity() -> Self {
        Self {
            elements: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn zeros() -> Self {
        Self {
            elements: [[0.0; 4]; 4],
        }
    }

    pub fn from_array(elements: [[f64; 4]; 4]) -> Self {
        Self { elements }
    }

    /// Sixteen values listed row by row.
    pub fn from_row_major(values: [f64; 16]) -> Self {
        let mut elements = [[0.0; 4]; 4];
        for (i, row) in elements.iter_mut().enumerate() {
            row.copy_from_slice(&values[i * 4..i * 4 + 4]);
        }
        Self { elements }
    }

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
        if index < 4 {
            Ok(())
        } else {
            Err(SpatialError::index_out_of_bounds("Matrix4", index, 4))
        }
    }

    pub fn elements(&self) -> &[[f64; 4]; 4] {
        &self.elements
    }

    pub fn row(&self, index: usize) -> SpatialResult<Vector4> {
        Self::check_index(index)?;
        Ok(Vector4::from_array(self.elements[index]))
    }

    pub fn column(&self, index: usize) -> SpatialResult<Vector4> {
        Self::check_index(index)?;
        let m = &self.elements;
        Ok(Vector4::new(m[0][index], m[1][index], m[2][index], m[3][index]))
    }

    pub fn set_row(&mut self, index: usize, row: &Vector4) -> SpatialResult<()> {
        Self::check_index(index)?;
        self.elements[index] = row.to_array();
        Ok(())
    }

    pub fn set_column(&mut self, index: usize, column: &Vector4) -> SpatialResult<()> {
        Self::check_index(index)?;
        for (row, value) in self.elements.iter_mut().zip(column.to_array()) {
            row[index] = value;
        }
        Ok(())
    }

    /// Replaces the upper-left 3x3 block; other elements are kept.
    pub fn set_rotation(mut self, rotation: &Matrix3) -> Self {
        for (row, src) in self.elements.iter_mut().zip(rotation.elements()) {
            row[..3].copy_from_slice(src);
        }
        self
    }

    /// Replaces the diagonal of the 3x3 block with `scale`.
    pub fn set_scale(mut self, scale: &Vector3) -> Self {
        self.elements[0][0] = scale.x;
        self.elements[1][1] = scale.y;
        self.elements[2][2] = scale.z;
        self
    }

    /// Replaces the translation column.
    pub fn set_translation(mut self, translation: &Vector3) -> Self {
        self.elements[0][3] = translation.x;
        self.elements[1][3] = translation.y;
        self.elements[2][3] = translation.z;
        self
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 4]; 4];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..4 {
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

    /// Applies the transform to the point `(x, y, z, 1)` and divides by the
    /// resulting `w`.
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        let m = &self.elements;
        let w = 1.0 / (m[3][0] * point.x + m[3][1] * point.y + m[3][2] * point.z + m[3][3]);
        Vector3::new(
            w * (m[0][0] * point.x + m[0][1] * point.y + m[0][2] * point.z + m[0][3]),
            w * (m[1][0] * point.x + m[1][1] * point.y + m[1][2] * point.z + m[1][3]),
            w * (m[2][0] * point.x + m[2][1] * point.y + m[2][2] * point.z + m[2][3]),
        )
    }

    /// Laplace expansion along the first row using 2x2 minors of the bottom rows.
    pub fn determinant(&self) -> f64 {
        let minors = BottomMinors::new(&self.elements);
        let m = &self.elements;
        m[0][0] * (m[1][1] * minors.a2323 - m[1][2] * minors.a1323 + m[1][3] * minors.a1223)
            - m[0][1] * (m[1][0] * minors.a2323 - m[1][2] * minors.a0323 + m[1][3] * minors.a0223)
            + m[0][2] * (m[1][0] * minors.a1323 - m[1][1] * minors.a0323 + m[1][3] * minors.a0123)
            - m[0][3] * (m[1][0] * minors.a1223 - m[1][1] * minors.a0223 + m[1][2] * minors.a0123)
    }

    /// Cofactor inverse, or `None` when the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;
        let m = &self.elements;
        let b = BottomMinors::new(m);

        // 2x2 minors pairing row 1 with rows 2 and 3
        let a2313 = m[1][2] * m[3][3] - m[1][3] * m[3][2];
        let a1313 = m[1][1] * m[3][3] - m[1][3] * m[3][1];
        let a1213 = m[1][1] * m[3][2] - m[1][2] * m[3][1];
        let a2312 = m[1][2] * m[2][3] - m[1][3] * m[2][2];
        let a1312 = m[1][1] * m[2][3] - m[1][3] * m[2][1];
        let a1212 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let a0313 = m[1][0] * m[3][3] - m[1][3] * m[3][0];
        let a0213 = m[1][0] * m[3][2] - m[1][2] * m[3][0];
        let a0312 = m[1][0] * m[2][3] - m[1][3] * m[2][0];
        let a0212 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
        let a0113 = m[1][0] * m[3][1] - m[1][1] * m[3][0];
        let a0112 = m[1][0] * m[2][1] - m[1][1] * m[2][0];

        Some(Self::from_array([
            [
                inv * (m[1][1] * b.a2323 - m[1][2] * b.a1323 + m[1][3] * b.a1223),
                inv * -(m[0][1] * b.a2323 - m[0][2] * b.a1323 + m[0][3] * b.a1223),
                inv * (m[0][1] * a2313 - m[0][2] * a1313 + m[0][3] * a1213),
                inv * -(m[0][1] * a2312 - m[0][2] * a1312 + m[0][3] * a1212),
            ],
            [
                inv * -(m[1][0] * b.a2323 - m[1][2] * b.a0323 + m[1][3] * b.a0223),
                inv * (m[0][0] * b.a2323 - m[0][2] * b.a0323 + m[0][3] * b.a0223),
                inv * -(m[0][0] * a2313 - m[0][2] * a0313 + m[0][3] * a0213),
                inv * (m[0][0] * a2312 - m[0][2] * a0312 + m[0][3] * a0212),
            ],
            [
                inv * (m[1][0] * b.a1323 - m[1][1] * b.a0323 + m[1][3] * b.a0123),
                inv * -(m[0][0] * b.a1323 - m[0][1] * b.a0323 + m[0][3] * b.a0123),
                inv * (m[0][0] * a1313 - m[0][1] * a0313 + m[0][3] * a0113),
                inv * -(m[0][0] * a1312 - m[0][1] * a0312 + m[0][3] * a0112),
            ],
            [
                inv * -(m[1][0] * b.a1223 - m[1][1] * b.a0223 + m[1][2] * b.a0123),
                inv * (m[0][0] * b.a1223 - m[0][1] * b.a0223 + m[0][2] * b.a0123),
                inv * -(m[0][0] * a1213 - m[0][1] * a0213 + m[0][2] * a0113),
                inv * (m[0][0] * a1212 - m[0][1] * a0212 + m[0][2] * a0112),
            ],
        ]))
    }

    pub fn transpose(&self) -> Self {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in self.elements.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                result[j][i] = *value;
            }
        }
        Self::from_array(result)
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::from_array(self.elements.map(|row| row.map(&f)))
    }

    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|e| e * scalar)
    }

    /// `true` when all sixteen elements differ by less than `precision`.
    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.max_difference(other) < precision
    }

    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;

        for i in 0..4 {
            for j in 0..4 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    pub fn to_array(&self) -> [f64; 16] {
        let mut values = [0.0; 16];
        for (chunk, row) in values.chunks_exact_mut(4).zip(&self.elements) {
            chunk.copy_from_slice(row);
        }
        values
    }

    /// Embeds the rotation of `euler` in an otherwise zero matrix.
    ///
    /// Only the 3x3 block is written, so the result has `m44 = 0`. Chain
    /// `Matrix4::identity().set_rotation(&Matrix3::from_euler(e))` for an
    /// affine transform.
    pub fn from_euler(euler: &Euler) -> Self {
        Self::zeros().set_rotation(&Matrix3::from_euler(euler))
    }

    /// Affine rotation of `angle` radians about `axis`.
    ///
    /// The axis is used as given; pass a unit vector.
    pub fn rotation_around_axis(axis: &Vector3, angle: f64) -> Self {
        Self::identity().set_rotation(&rodrigues(axis, angle))
    }

    /// Affine transform whose columns are the three axis directions and the
    /// origin `position`.
    pub fn from_axes(
        x_direction: &Vector3,
        y_direction: &Vector3,
        z_direction: &Vector3,
        position: &Vector3,
    ) -> Self {
        Self::from_array([
            [x_direction.x, y_direction.x, z_direction.x, position.x],
            [x_direction.y, y_direction.y, z_direction.y, position.y],
            [x_direction.z, y_direction.z, z_direction.z, position.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// 2x2 minors of the two bottom rows. `aIJKL` spans columns `I`, `J` and
/// rows `K`, `L`, all 0-based.
struct BottomMinors {
    a2323: f64,
    a1323: f64,
    a1223: f64,
    a0323: f64,
    a0223: f64,
    a0123: f64,
}

impl BottomMinors {
    fn new(m: &[[f64; 4]; 4]) -> Self {
        Self {
            a2323: m[2][2] * m[3][3] - m[2][3] * m[3][2],
            a1323: m[2][1] * m[3][3] - m[2][3] * m[3][1],
            a1223: m[2][1] * m[3][2] - m[2][2] * m[3][1],
            a0323: m[2][0] * m[3][3] - m[2][3] * m[3][0],
            a0223: m[2][0] * m[3][2] - m[2][2] * m[3][0],
            a0123: m[2][0] * m[3][1] - m[2][1] * m[3][0],
        }
    }
}

impl From<[[f64; 4]; 4]> for Matrix4 {
    fn from(elements: [[f64; 4]; 4]) -> Self {
        Self::from_array(elements)
    }
}

impl From<Matrix4> for [[f64; 4]; 4] {
    fn from(m: Matrix4) -> Self {
        m.elements
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        self.multiply(rhs)
    }
}

impl std::ops::MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl std::ops::Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, vec: Vector4) -> Vector4 {
        &self * vec
    }
}

impl std::ops::Mul<Vector4> for &Matrix4 {
    type Output = Vector4;

    fn mul(self, vec: Vector4) -> Vector4 {
        let v = vec.to_array();
        let row = |i: usize| {
            let r = &self.elements[i];
            r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3]
        };
        Vector4::new(row(0), row(1), row(2), row(3))
    }
}

impl std::ops::Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix4:")?;
        for row in &self.elements {
            writeln!(
                f,
                "  [{:12.9} {:12.9} {:12.9} {:12.9}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HALF_PI;
    use crate::{AxisAngle, EulerOrder};

    fn sample() -> Matrix4 {
        Matrix4::from_array([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0, 5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0, 0.0],
        ])
    }

    #[test]
    fn test_identity_and_access() {
        let mut m = Matrix4::identity();
        assert_eq!(m.get(3, 3).unwrap(), 1.0);
        assert!(m.get(4, 0).is_err());
        m.set(0, 3, 2.0).unwrap();
        assert_eq!(m[(0, 3)], 2.0);
        assert!(m.set(0, 4, 2.0).is_err());
        assert_eq!(Matrix4::default(), Matrix4::identity());
    }

    #[test]
    fn test_rows_columns_and_flat_layout() {
        let values: [f64; 16] = std::array::from_fn(|i| i as f64);
        let mut m = Matrix4::from_row_major(values);
        assert_eq!(m.to_array(), values);
        assert_eq!(m.row(1).unwrap(), Vector4::new(4.0, 5.0, 6.0, 7.0));
        assert_eq!(m.column(2).unwrap(), Vector4::new(2.0, 6.0, 10.0, 14.0));
        assert!(m.column(4).is_err());

        m.set_row(0, &Vector4::zeros()).unwrap();
        m.set_column(3, &Vector4::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        assert_eq!(m.row(0).unwrap(), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(m.transpose().row(3).unwrap(), Vector4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(Matrix4::identity().determinant(), 1.0);
        assert_eq!(sample().determinant(), 30.0);
        let diag = Matrix4::identity().set_scale(&Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(diag.determinant(), 24.0);
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Matrix4::identity(), 1e-14));
        assert!((inv * m).approx_eq(&Matrix4::identity(), 1e-14));

        let mut singular = Matrix4::identity();
        singular[(2, 2)] = 0.0;
        assert!(singular.inverse().is_none());
    }

    #[test]
    fn test_builders() {
        let r = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), HALF_PI));
        let m = Matrix4::identity()
            .set_rotation(&r)
            .set_translation(&Vector3::new(1.0, 0.0, 0.0));

        let p = m.transform_point(&Vector3::x_axis());
        assert!(p.approx_eq(&Vector3::new(1.0, 1.0, 0.0), 1e-15));
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn test_transform_point_divides_by_w() {
        let mut m = Matrix4::identity();
        m[(3, 3)] = 2.0;
        assert_eq!(
            m.transform_point(&Vector3::new(2.0, 4.0, 6.0)),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_from_euler_leaves_projective_row_zero() {
        let e = Euler::new(0.3, 0.2, 0.1, EulerOrder::ZXY);
        let m = Matrix4::from_euler(&e);
        let r = Matrix3::from_euler(&e);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], r[(i, j)]);
            }
        }
        assert_eq!(m.row(3).unwrap(), Vector4::zeros());
        assert_eq!(m.column(3).unwrap(), Vector4::zeros());
    }

    #[test]
    fn test_rotation_around_axis() {
        let m = Matrix4::rotation_around_axis(&Vector3::x_axis(), HALF_PI);
        let v = m * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!(v.approx_eq(&Vector4::new(0.0, 0.0, 1.0, 1.0), 1e-15));
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn test_from_axes() {
        let m = Matrix4::from_axes(
            &Vector3::y_axis(),
            &-Vector3::x_axis(),
            &Vector3::z_axis(),
            &Vector3::new(10.0, 0.0, 0.0),
        );
        assert_eq!(
            m.transform_point(&Vector3::x_axis()),
            Vector3::new(10.0, 1.0, 0.0)
        );
        assert_eq!(m.row(3).unwrap(), Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_approx_eq_checks_last_row() {
        let a = Matrix4::identity();
        let mut b = a;
        b[(3, 3)] = 1.5;
        assert!(!a.approx_eq(&b, 0.1));
        b = a;
        b[(3, 2)] = 0.5;
        assert!(!a.approx_eq(&b, 0.1));
        assert!(a.approx_eq(&a.map(|e| e + 1e-12), 1e-10));
    }

    #[test]
    fn test_operators() {
        let a = sample();
        let b = Matrix4::identity().scale(2.0);
        assert_eq!(a * b, a.scale(2.0));
        assert_eq!(&a * &b, a * b);
        assert_eq!(b.premultiply(&a), a * b);
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
        assert!(format!("{}", a).starts_with("Matrix4:"));
    }
}
