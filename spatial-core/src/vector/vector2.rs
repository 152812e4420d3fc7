//! 2D Cartesian vectors.

use crate::constants::{PI, TWOPI};
use crate::utils::clamp;
use crate::{Matrix2, Matrix3, SpatialError, SpatialResult, Vector3};
use std::fmt;

/// A 2D Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn get(&self, index: usize) -> SpatialResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(SpatialError::index_out_of_bounds("Vector2", index, 2)),
        }
    }

    pub fn set(&mut self, index: usize, value: f64) -> SpatialResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => return Err(SpatialError::index_out_of_bounds("Vector2", index, 2)),
        }
        Ok(())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        libm::sqrt(self.length_squared())
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction; the zero vector is returned unchanged.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            *self
        } else {
            *self / length
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    /// Unsigned angle in `[0, π]`; `π/2` if either vector is zero.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let denominator = self.length_squared() * other.length_squared();
        if denominator == 0.0 {
            return PI / 2.0;
        }
        let cos = self.dot(other) / libm::sqrt(denominator);
        libm::acos(clamp(cos, -1.0, 1.0))
    }

    pub fn is_orthogonal_to(&self, other: &Self, precision: f64) -> bool {
        self.dot(other).abs() < precision
    }

    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.distance_to(other) < precision
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    #[inline]
    pub fn scale(&self, scalar: f64) -> Self {
        *self * scalar
    }

    pub fn component_mul(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Counter-clockwise perpendicular `(-y, x)`, same length as `self`.
    pub fn orthogonal_direction(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Orthogonal projection onto the line through `position` along `direction`.
    ///
    /// `direction` is expected to be normalized.
    pub fn project_on_line(&self, position: &Self, direction: &Self) -> Self {
        let magnitude = direction.dot(&(*self - *position));
        *direction * magnitude + *position
    }

    /// Distance to the line through `position` along the normalized `direction`.
    pub fn distance_to_line(&self, position: &Self, direction: &Self) -> f64 {
        self.distance_to(&self.project_on_line(position, direction))
    }

    pub fn random() -> Self {
        Self::new(fastrand::f64(), fastrand::f64())
    }

    pub fn random_with_rng(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.f64(), rng.f64())
    }

    /// Random point uniformly distributed on the unit circle.
    pub fn random_direction() -> Self {
        let mut rng = fastrand::Rng::new();
        Self::random_direction_with_rng(&mut rng)
    }

    pub fn random_direction_with_rng(rng: &mut fastrand::Rng) -> Self {
        let (sin_t, cos_t) = libm::sincos(rng.f64() * TWOPI);
        Self::new(cos_t, sin_t)
    }

    /// `matrix * self`.
    pub fn transform(&self, matrix: &Matrix2) -> Self {
        matrix * *self
    }

    /// `self * matrix` (row vector on the left).
    pub fn transform_transposed(&self, matrix: &Matrix2) -> Self {
        let m = matrix.elements();
        Self::new(
            self.x * m[0][0] + self.y * m[1][0],
            self.x * m[0][1] + self.y * m[1][1],
        )
    }

    /// Treats `self` as `(x, y, 1)`, applies the 3x3 `matrix` and divides by the
    /// resulting homogeneous coordinate.
    pub fn transform_homogeneous(&self, matrix: &Matrix3) -> Self {
        let m = matrix.elements();
        let w = 1.0 / (m[2][0] * self.x + m[2][1] * self.y + m[2][2]);
        Self::new(
            (m[0][0] * self.x + m[0][1] * self.y + m[0][2]) * w,
            (m[1][0] * self.x + m[1][1] * self.y + m[1][2]) * w,
        )
    }

    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x, self.y, 0.0)
    }

    pub fn from_vector3(v: &Vector3) -> Self {
        Self::new(v.x, v.y)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn from_array(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(arr: [f64; 2]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        v.to_array()
    }
}

impl std::ops::Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, vec: Vector2) -> Vector2 {
        vec * self
    }
}

impl std::ops::MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl std::ops::Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, scalar: f64) {
        self.x /= scalar;
        self.y /= scalar;
    }
}

impl std::ops::Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Index<usize> for Vector2 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index out of bounds: {}", index),
        }
    }
}

impl std::ops::IndexMut<usize> for Vector2 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index out of bounds: {}", index),
        }
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2({:.9}, {:.9})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EPSILON, HALF_PI};

    #[test]
    fn test_vector2_basics() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.normalize(), Vector2::new(0.6, 0.8));
        assert_eq!(Vector2::zeros().normalize(), Vector2::zeros());
        assert_eq!(v.dot(&Vector2::new(1.0, 1.0)), 7.0);
    }

    #[test]
    fn test_vector2_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 5.0);
        assert_eq!(a + b, Vector2::new(4.0, 7.0));
        assert_eq!(b - a, Vector2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(1.5, 2.5));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(a.component_mul(&b), Vector2::new(3.0, 10.0));

        let mut c = a;
        c += b;
        c *= 2.0;
        assert_eq!(c, Vector2::new(8.0, 14.0));
        c -= Vector2::new(8.0, 14.0);
        assert_eq!(c, Vector2::zeros());
    }

    #[test]
    fn test_angle_and_orthogonality() {
        let x = Vector2::new(1.0, 0.0);
        let y = x.orthogonal_direction();
        assert_eq!(y, Vector2::new(0.0, 1.0));
        assert!(x.is_orthogonal_to(&y, EPSILON));
        assert!((x.angle_to(&y) - HALF_PI).abs() < 1e-15);
        assert_eq!(x.angle_to(&Vector2::zeros()), PI / 2.0);
    }

    #[test]
    fn test_project_on_line() {
        let p = Vector2::new(2.0, 3.0);
        let origin = Vector2::new(0.0, 1.0);
        let direction = Vector2::new(1.0, 0.0);
        assert_eq!(p.project_on_line(&origin, &direction), Vector2::new(2.0, 1.0));
        assert_eq!(p.distance_to_line(&origin, &direction), 2.0);
    }

    #[test]
    fn test_lerp_and_equality() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(1.0, -1.0);
        assert_eq!(a.lerp(&b, 0.25), Vector2::new(0.25, -0.25));
        assert!(a.approx_eq(&Vector2::new(1e-11, 0.0), EPSILON));
        assert!(!a.approx_eq(&b, EPSILON));
        assert_eq!(a.distance_squared_to(&b), 2.0);
    }

    #[test]
    fn test_transforms() {
        let m = Matrix2::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let v = Vector2::new(1.0, 1.0);
        assert_eq!(v.transform(&m), Vector2::new(3.0, 7.0));
        assert_eq!(v.transform_transposed(&m), Vector2::new(4.0, 6.0));

        // translation by (5, -1) in homogeneous 2D coordinates
        let h = Matrix3::from_array([[1.0, 0.0, 5.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]]);
        assert_eq!(v.transform_homogeneous(&h), Vector2::new(6.0, 0.0));
    }

    #[test]
    fn test_random_direction_on_unit_circle() {
        let mut rng = fastrand::Rng::with_seed(9);
        for _ in 0..100 {
            let d = Vector2::random_direction_with_rng(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-12);
        }
        let r = Vector2::random_with_rng(&mut rng);
        assert!((0.0..1.0).contains(&r.x) && (0.0..1.0).contains(&r.y));
    }

    #[test]
    fn test_conversions_and_access() {
        let mut v = Vector2::new(1.0, 2.0);
        assert_eq!(v.to_vector3(), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(Vector2::from_vector3(&Vector3::new(7.0, 8.0, 9.0)), Vector2::new(7.0, 8.0));
        assert_eq!(v.to_array(), [1.0, 2.0]);
        assert_eq!(Vector2::from([1.0, 2.0]), v);
        assert_eq!(v.get(1).unwrap(), 2.0);
        assert!(v.get(2).is_err());
        v.set(0, 9.0).unwrap();
        v[1] = 8.0;
        assert_eq!(v, Vector2::new(9.0, 8.0));
        assert!(v.is_finite());
        assert_eq!(v.map(|c| c - 8.0), Vector2::new(1.0, 0.0));
        assert!(format!("{}", v).starts_with("Vector2("));
    }

    #[test]
    #[should_panic(expected = "Vector2 index out of bounds: 2")]
    fn test_index_panic() {
        let v = Vector2::zeros();
        let _ = v[2];
    }
}
