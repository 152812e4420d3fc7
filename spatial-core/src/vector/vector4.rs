use crate::constants::{EPSILON, PI};
use crate::utils::clamp;
use crate::{Matrix4, Quaternion, SpatialError, SpatialResult, Vector3};
use std::fmt;

/// A 4-component vector, typically a homogeneous point or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, index: usize) -> SpatialResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(SpatialError::index_out_of_bounds("Vector4", index, 4)),
        }
    }

    pub fn set(&mut self, index: usize, value: f64) -> SpatialResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(SpatialError::index_out_of_bounds("Vector4", index, 4)),
        }
        Ok(())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        libm::sqrt(self.length_squared())
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Unit vector in the same direction. Vectors shorter than [`EPSILON`]
    /// are returned unchanged.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length < EPSILON {
            *self
        } else {
            *self / length
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Cross product of the xyz parts; the result has `w = 1`.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
            1.0,
        )
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    pub fn angle_to(&self, other: &Self) -> f64 {
        let denominator = self.length_squared() * other.length_squared();
        if denominator == 0.0 {
            return PI / 2.0;
        }
        let cos = self.dot(other) / libm::sqrt(denominator);
        libm::acos(clamp(cos, -1.0, 1.0))
    }

    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.distance_to(other) < precision
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z), f(self.w))
    }

    #[inline]
    pub fn scale(&self, scalar: f64) -> Self {
        *self * scalar
    }

    pub fn component_mul(&self, other: &Self) -> Self {
        Self::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    pub fn random() -> Self {
        Self::new(fastrand::f64(), fastrand::f64(), fastrand::f64(), fastrand::f64())
    }

    pub fn random_with_rng(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.f64(), rng.f64(), rng.f64(), rng.f64())
    }

    /// `matrix * self`.
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        matrix * *self
    }

    /// `self * matrix` (row vector on the left).
    pub fn transform_transposed(&self, matrix: &Matrix4) -> Self {
        let m = matrix.elements();
        let column = |j: usize| {
            self.x * m[0][j] + self.y * m[1][j] + self.z * m[2][j] + self.w * m[3][j]
        };
        Self::new(column(0), column(1), column(2), column(3))
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::new(self.x, self.y, self.z, self.w)
    }

    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }

    pub fn to_vector3(&self) -> Vector3 {
        Vector3::from_vector4(self)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(arr: [f64; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vector4> for [f64; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

impl std::ops::Add for Vector4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl std::ops::AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vector4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl std::ops::SubAssign for Vector4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<f64> for Vector4 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }
}

impl std::ops::Mul<Vector4> for f64 {
    type Output = Vector4;

    fn mul(self, vec: Vector4) -> Vector4 {
        vec * self
    }
}

impl std::ops::MulAssign<f64> for Vector4 {
    fn mul_assign(&mut self, scalar: f64) {
        *self = *self * scalar;
    }
}

impl std::ops::Div<f64> for Vector4 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar, self.w / scalar)
    }
}

impl std::ops::DivAssign<f64> for Vector4 {
    fn div_assign(&mut self, scalar: f64) {
        *self = *self / scalar;
    }
}

impl std::ops::Neg for Vector4 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl std::ops::Index<usize> for Vector4 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of bounds: {}", index),
        }
    }
}

impl std::ops::IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4 index out of bounds: {}", index),
        }
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector4({:.9}, {:.9}, {:.9}, {:.9})",
            self.x, self.y, self.z, self.w
        )
    }
}
