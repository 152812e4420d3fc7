/// Default Euclidean distance below which two points are considered coincident.
pub const TOLERANCE: f64 = 1e-6;

/// Default threshold for floating-point equality and singularity tests.
pub const EPSILON: f64 = 1e-10;

/// Pole threshold for Euler extraction: the regular branch is taken when
/// `|sin(middle)| - EULER_POLE_PRECISION < 1` and the sine is not exactly ±1.
pub const EULER_POLE_PRECISION: f64 = 1e-15;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;
