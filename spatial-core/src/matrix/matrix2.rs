use crate::{SpatialError, SpatialResult, Vector2};
use std::fmt;

/// A 2x2 matrix with row-major storage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")
)]
pub struct Matrix2 {
    elements: [[f64; 2]; 2],
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2 {
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0], [0.0, 1.0]],
        }
    }

    pub fn zeros() -> Self {
        Self {
            elements: [[0.0; 2]; 2],
        }
    }

    pub fn from_array(elements: [[f64; 2]; 2]) -> Self {
        Self { elements }
    }

    /// `m11, m12, m21, m22`.
    pub fn from_row_major(values: [f64; 4]) -> Self {
        Self::from_array([[values[0], values[1]], [values[2], values[3]]])
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self::from_array([[c, -s], [s, c]])
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
        if index < 2 {
            Ok(())
        } else {
            Err(SpatialError::index_out_of_bounds("Matrix2", index, 2))
        }
    }

    pub fn elements(&self) -> &[[f64; 2]; 2] {
        &self.elements
    }

    pub fn row(&self, index: usize) -> SpatialResult<Vector2> {
        Self::check_index(index)?;
        Ok(Vector2::from_array(self.elements[index]))
    }

    pub fn column(&self, index: usize) -> SpatialResult<Vector2> {
        Self::check_index(index)?;
        Ok(Vector2::new(
            self.elements[0][index],
            self.elements[1][index],
        ))
    }

    pub fn set_row(&mut self, index: usize, row: &Vector2) -> SpatialResult<()> {
        Self::check_index(index)?;
        self.elements[index] = row.to_array();
        Ok(())
    }

    pub fn set_column(&mut self, index: usize, column: &Vector2) -> SpatialResult<()> {
        Self::check_index(index)?;
        self.elements[0][index] = column.x;
        self.elements[1][index] = column.y;
        Ok(())
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 2]; 2];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..2 {
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

    pub fn determinant(&self) -> f64 {
        let m = &self.elements;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    /// `None` when the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;
        let m = &self.elements;
        Some(Self::from_array([
            [inv * m[1][1], -inv * m[0][1]],
            [-inv * m[1][0], inv * m[0][0]],
        ]))
    }

    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::from_array([[m[0][0], m[1][0]], [m[0][1], m[1][1]]])
    }

    pub fn trace(&self) -> f64 {
        self.elements[0][0] + self.elements[1][1]
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::from_array(self.elements.map(|row| row.map(&f)))
    }

    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|e| e * scalar)
    }

    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.max_difference(other) < precision
    }

    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;

        for i in 0..2 {
            for j in 0..2 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    pub fn to_array(&self) -> [f64; 4] {
        let m = &self.elements;
        [m[0][0], m[0][1], m[1][0], m[1][1]]
    }
}

impl From<[[f64; 2]; 2]> for Matrix2 {
    fn from(elements: [[f64; 2]; 2]) -> Self {
        Self::from_array(elements)
    }
}

impl From<Matrix2> for [[f64; 2]; 2] {
    fn from(m: Matrix2) -> Self {
        m.elements
    }
}

impl std::ops::Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix2> for &Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: &Matrix2) -> Matrix2 {
        self.multiply(rhs)
    }
}

impl std::ops::MulAssign for Matrix2 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl std::ops::Mul<Vector2> for Matrix2 {
    type Output = Vector2;

    fn mul(self, vec: Vector2) -> Vector2 {
        &self * vec
    }
}

impl std::ops::Mul<Vector2> for &Matrix2 {
    type Output = Vector2;

    fn mul(self, vec: Vector2) -> Vector2 {
        let m = &self.elements;
        Vector2::new(
            m[0][0] * vec.x + m[0][1] * vec.y,
            m[1][0] * vec.x + m[1][1] * vec.y,
        )
    }
}

impl std::ops::Index<(usize, usize)> for Matrix2 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix2 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix2:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9}]", row[0], row[1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HALF_PI;

    #[test]
    fn test_identity_and_access() {
        let mut m = Matrix2::identity();
        assert_eq!(m.get(1, 1).unwrap(), 1.0);
        assert!(m.get(2, 0).is_err());
        m.set(0, 1, 3.0).unwrap();
        assert_eq!(m[(0, 1)], 3.0);
        assert_eq!(m.to_array(), [1.0, 3.0, 0.0, 1.0]);
        assert_eq!(Matrix2::from_row_major([1.0, 3.0, 0.0, 1.0]), m);
    }

    #[test]
    fn test_rows_and_columns() {
        let mut m = Matrix2::from_array([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.row(1).unwrap(), Vector2::new(3.0, 4.0));
        assert_eq!(m.column(0).unwrap(), Vector2::new(1.0, 3.0));
        m.set_row(0, &Vector2::new(5.0, 6.0)).unwrap();
        m.set_column(1, &Vector2::new(0.0, 0.0)).unwrap();
        assert_eq!(m, Matrix2::from_array([[5.0, 0.0], [3.0, 0.0]]));
        assert!(m.set_row(2, &Vector2::zeros()).is_err());
    }

    #[test]
    fn test_determinant_inverse() {
        let m = Matrix2::from_array([[4.0, 7.0], [2.0, 6.0]]);
        assert_eq!(m.determinant(), 10.0);
        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Matrix2::identity(), 1e-15));

        let singular = Matrix2::from_array([[1.0, 2.0], [2.0, 4.0]]);
        assert!(singular.inverse().is_none());
    }

    #[test]
    fn test_transpose_trace_multiply() {
        let a = Matrix2::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix2::from_array([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(a.transpose(), Matrix2::from_array([[1.0, 3.0], [2.0, 4.0]]));
        assert_eq!(a.trace(), 5.0);
        assert_eq!(a * b, Matrix2::from_array([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(a.premultiply(&b), Matrix2::from_array([[3.0, 4.0], [1.0, 2.0]]));
        assert_eq!(&a * &b, a * b);
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
        assert_eq!(a.scale(2.0).max_difference(&a), 4.0);
    }

    #[test]
    fn test_rotation() {
        let r = Matrix2::rotation(HALF_PI);
        let v = r * Vector2::new(1.0, 0.0);
        assert!(v.approx_eq(&Vector2::new(0.0, 1.0), 1e-15));
        assert!((r.determinant() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert!(format!("{}", Matrix2::identity()).starts_with("Matrix2:"));
    }
}
