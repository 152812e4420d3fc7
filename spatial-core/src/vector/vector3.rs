//! 3D Cartesian vectors.
//!
//! [`Vector3`] is the workhorse of the crate: rotation axes, the vectors that
//! quaternions and matrices rotate, and the imaginary part of a quaternion are
//! all `Vector3`s.
//!
//! # Dot and Cross Products
//!
//! - **Dot product**: for unit vectors, `a.dot(&b)` is the cosine of the angle
//!   between them. `Quaternion::from_two_vectors` uses `dot + 1` to detect
//!   antiparallel inputs.
//! - **Cross product**: the axis perpendicular to both inputs, right-hand rule.
//!
//! ```
//! use spatial_core::Vector3;
//!
//! let a = Vector3::x_axis();
//! let b = Vector3::y_axis();
//!
//! assert_eq!(a.dot(&b), 0.0);
//! assert_eq!(a.cross(&b), Vector3::z_axis());
//! ```
//!
//! # Threshold Semantics
//!
//! The comparison helpers do not share a single notion of "close":
//!
//! | Method | Test |
//! |--------|------|
//! | [`approx_eq`](Vector3::approx_eq) | `distance < precision` |
//! | [`is_orthogonal_to`](Vector3::is_orthogonal_to) | `abs(dot) < precision` |
//! | [`is_colinear_to`](Vector3::is_colinear_to) | `length(cross) < sqrt(precision)` |
//!
//! Keep these in mind when passing a custom precision.
use crate::constants::{EPSILON, PI};
use crate::utils::clamp;
use crate::{
    MathErrorKind, Matrix3, Matrix4, Quaternion, SpatialError, SpatialResult, Vector2, Vector4,
};
use std::fmt;

/// A 3D Cartesian vector.
///
/// Components are public. No invariant is enforced; non-finite components are
/// accepted and propagate through arithmetic (check with
/// [`is_finite`](Self::is_finite) if needed).
///
/// ```
/// use spatial_core::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// let w = Vector3::from_array([1.0, 2.0, 3.0]);
/// assert_eq!(v, w);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 3]", into = "[f64; 3]")
)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the zero vector `[0, 0, 0]`.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the X axis `[1, 0, 0]`.
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the Y axis `[0, 1, 0]`.
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Returns the unit vector along the Z axis `[0, 0, 1]`.
    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the component at the given index (0=x, 1=y, 2=z).
    ///
    /// Returns an error for indices outside 0-2. For unchecked access, use
    /// indexing syntax `v[i]` or the public fields directly.
    pub fn get(&self, index: usize) -> SpatialResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(SpatialError::index_out_of_bounds("Vector3", index, 3)),
        }
    }

    /// Sets the component at the given index (0=x, 1=y, 2=z).
    pub fn set(&mut self, index: usize, value: f64) -> SpatialResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(SpatialError::index_out_of_bounds("Vector3", index, 3)),
        }
        Ok(())
    }

    /// Returns the Euclidean length (L2 norm) of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        libm::sqrt(self.length_squared())
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector pointing in the same direction.
    ///
    /// If the vector has zero length, returns the zero vector unchanged (avoids NaN).
    ///
    /// ```
    /// use spatial_core::Vector3;
    ///
    /// let v = Vector3::new(3.0, 4.0, 0.0);
    /// assert_eq!(v.normalize(), Vector3::new(0.6, 0.8, 0.0));
    /// assert_eq!(Vector3::zeros().normalize(), Vector3::zeros());
    /// ```
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            *self
        } else {
            *self / length
        }
    }

    /// Like [`normalize`](Self::normalize), but reports a zero-length vector as an error.
    pub fn try_normalize(&self) -> SpatialResult<Self> {
        let length = self.length();
        if length == 0.0 {
            return Err(SpatialError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::DivisionByZero,
                "vector has zero length",
            ));
        }
        if !length.is_finite() {
            return Err(SpatialError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::NotFinite,
                &format!("vector length is {}", length),
            ));
        }
        Ok(*self / length)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product with another vector (right-hand rule).
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    /// Unsigned angle between two vectors, in `[0, π]`.
    ///
    /// Returns `π/2` when either vector has zero length. The cosine is clamped
    /// to `[-1, 1]` before `acos` so rounding cannot produce NaN.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let denominator = self.length_squared() * other.length_squared();
        if denominator == 0.0 {
            return PI / 2.0;
        }
        let cos = self.dot(other) / libm::sqrt(denominator);
        libm::acos(clamp(cos, -1.0, 1.0))
    }

    /// `true` when `length(self × other) < sqrt(precision)`.
    pub fn is_colinear_to(&self, other: &Self, precision: f64) -> bool {
        self.cross(other).length() < libm::sqrt(precision)
    }

    /// `true` when `abs(self · other) < precision`.
    pub fn is_orthogonal_to(&self, other: &Self, precision: f64) -> bool {
        self.dot(other).abs() < precision
    }

    /// `true` when the Euclidean distance between the vectors is below `precision`.
    pub fn approx_eq(&self, other: &Self, precision: f64) -> bool {
        self.distance_to(other) < precision
    }

    /// Linear interpolation: `self + (other - self) * t`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Applies `f` to every component.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    #[inline]
    pub fn scale(&self, scalar: f64) -> Self {
        *self * scalar
    }

    /// Component-wise (Hadamard) product.
    pub fn component_mul(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// A unit vector orthogonal to `self`.
    ///
    /// Draws random directions until one is not colinear with `self` (at the
    /// default [`EPSILON`] threshold) and returns the normalized cross product.
    /// The test runs on the direction of `self`, so its length does not
    /// matter. The zero vector has no direction and is returned as is.
    pub fn orthogonal_direction(&self) -> Self {
        let mut rng = fastrand::Rng::new();
        self.orthogonal_direction_with_rng(&mut rng)
    }

    pub fn orthogonal_direction_with_rng(&self, rng: &mut fastrand::Rng) -> Self {
        // rescale first so tiny components do not underflow in the length
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if largest == 0.0 || !largest.is_finite() {
            return *self;
        }
        let direction = (*self / largest).normalize();
        let mut candidate = Self::random_direction_with_rng(rng);
        while direction.is_colinear_to(&candidate, EPSILON) {
            candidate = Self::random_direction_with_rng(rng);
        }
        direction.cross(&candidate).normalize()
    }

    /// Random vector with every component in `[0, 1)`.
    pub fn random() -> Self {
        Self::new(fastrand::f64(), fastrand::f64(), fastrand::f64())
    }

    pub fn random_with_rng(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.f64(), rng.f64(), rng.f64())
    }

    /// Random point uniformly distributed on the unit sphere.
    pub fn random_direction() -> Self {
        let mut rng = fastrand::Rng::new();
        Self::random_direction_with_rng(&mut rng)
    }

    pub fn random_direction_with_rng(rng: &mut fastrand::Rng) -> Self {
        let u = (rng.f64() - 0.5) * 2.0;
        let t = rng.f64() * 2.0 * PI;
        let f = libm::sqrt(1.0 - u * u);
        let (sin_t, cos_t) = libm::sincos(t);
        Self::new(f * cos_t, f * sin_t, u)
    }

    /// Matrix-vector product `matrix * self`.
    pub fn transform(&self, matrix: &Matrix3) -> Self {
        matrix * *self
    }

    /// Row-vector product `self * matrix`, i.e. `matrixᵀ * self`.
    pub fn transform_transposed(&self, matrix: &Matrix3) -> Self {
        let m = matrix.elements();
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        )
    }

    /// Treats `self` as the point `(x, y, z, 1)`, applies `matrix` and divides by `w`.
    pub fn transform_point(&self, matrix: &Matrix4) -> Self {
        matrix.transform_point(self)
    }

    /// Quaternion `(x, y, z, 1)`.
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::new(self.x, self.y, self.z, 1.0)
    }

    /// Drops the z component.
    pub fn to_vector2(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Extends a 2D vector with `z = 0`.
    pub fn from_vector2(v: &Vector2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }

    /// Drops the w component.
    pub fn from_vector4(v: &Vector4) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

/// Vector * scalar
impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// scalar * Vector
impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        vec * self
    }
}

impl std::ops::MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, scalar: f64) {
        self.x /= scalar;
        self.y /= scalar;
        self.z /= scalar;
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// v[i] indexing (panics if i > 2)
impl std::ops::Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl std::ops::IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({:.9}, {:.9}, {:.9})", self.x, self.y, self.z)
    }
}
