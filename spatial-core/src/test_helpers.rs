//! Assertions shared by unit tests, integration tests and doctests.

use crate::{Matrix3, Quaternion, Vector3};

#[inline]
pub fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

/// Number of representable doubles between `a` and `b`.
#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    f64_to_ordered_u64(a).abs_diff(f64_to_ordered_u64(b))
}

#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}",
        ctx
    );
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} (0x{:016x}) b={} (0x{:016x})",
        ctx,
        d,
        max_ulp,
        a,
        a.to_bits(),
        b,
        b.to_bits()
    );
}

#[track_caller]
pub fn assert_near(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() <= tolerance,
        "|{} - {}| = {:e} exceeds {:e}",
        a,
        b,
        (a - b).abs(),
        tolerance
    );
}

#[track_caller]
pub fn assert_vec3_near(a: &Vector3, b: &Vector3, tolerance: f64) {
    let diff = (*a - *b).to_array().map(f64::abs);
    assert!(
        diff.iter().all(|d| *d <= tolerance),
        "{} vs {}: difference {:?} exceeds {:e}",
        a,
        b,
        diff,
        tolerance
    );
}

#[track_caller]
pub fn assert_quat_near(a: &Quaternion, b: &Quaternion, tolerance: f64) {
    let diff = [a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w].map(f64::abs);
    assert!(
        diff.iter().all(|d| *d <= tolerance),
        "{} vs {}: difference {:?} exceeds {:e}",
        a,
        b,
        diff,
        tolerance
    );
}

/// Like [`assert_quat_near`] but accepts `b` or `-b`.
#[track_caller]
pub fn assert_quat_same_rotation(a: &Quaternion, b: &Quaternion, tolerance: f64) {
    let b = if a.dot(b) < 0.0 { -*b } else { *b };
    assert_quat_near(a, &b, tolerance);
}

#[track_caller]
pub fn assert_matrix3_near(a: &Matrix3, b: &Matrix3, tolerance: f64) {
    let diff = a.max_difference(b);
    assert!(
        diff <= tolerance,
        "max element difference {:e} exceeds {:e}\n{}{}",
        diff,
        tolerance,
        a,
        b
    );
}

#[macro_export]
macro_rules! assert_ulp_lt {
    ($a:expr, $b:expr, $max_ulp:expr) => {
        $crate::test_helpers::assert_ulp_le(
            $a,
            $b,
            $max_ulp,
            &format!(
                "ULP check failed: {} vs {} (max_ulp={})",
                stringify!($a),
                stringify!($b),
                $max_ulp
            ),
        )
    };
    ($a:expr, $b:expr, $max_ulp:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_ulp_le($a, $b, $max_ulp, &format!($($arg)*))
    };
}
