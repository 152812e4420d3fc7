use spatial_core::assert_ulp_lt;
use spatial_core::constants::{HALF_PI, PI};
use spatial_core::test_helpers::{
    assert_matrix3_near, assert_near, assert_quat_near, assert_quat_same_rotation,
    assert_vec3_near,
};
use spatial_core::{AxisAngle, Euler, EulerOrder, Matrix3, Matrix4, Quaternion, Vector3};

const SAMPLES: usize = 200;

fn rng() -> fastrand::Rng {
    fastrand::Rng::with_seed(0x5eed_cafe)
}

fn random_unit_quaternion(rng: &mut fastrand::Rng) -> Quaternion {
    loop {
        let q = Quaternion::new(
            rng.f64() * 2.0 - 1.0,
            rng.f64() * 2.0 - 1.0,
            rng.f64() * 2.0 - 1.0,
            rng.f64() * 2.0 - 1.0,
        );
        if q.length() > 0.1 {
            return q.normalize();
        }
    }
}

/// Angles with the middle one strictly inside `(-π/2, π/2)`.
fn random_euler(rng: &mut fastrand::Rng, order: EulerOrder) -> Euler {
    let outer = |rng: &mut fastrand::Rng| (rng.f64() * 2.0 - 1.0) * (PI - 1e-3);
    let middle = (rng.f64() * 2.0 - 1.0) * (HALF_PI - 1e-3);
    let (a, c) = (outer(rng), outer(rng));
    match order {
        EulerOrder::XYZ | EulerOrder::ZYX => Euler::new(a, middle, c, order),
        EulerOrder::YXZ | EulerOrder::ZXY => Euler::new(middle, a, c, order),
        EulerOrder::XZY | EulerOrder::YZX => Euler::new(a, c, middle, order),
    }
}

// --- Quaternion <-> matrix ---

#[test]
fn quaternion_matrix_round_trip_up_to_sign() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let q = random_unit_quaternion(&mut rng);
        let back = Quaternion::from_matrix(&Matrix3::from_quaternion(&q));
        assert_quat_same_rotation(&back, &q, 1e-12);
    }
}

#[test]
fn rotation_matrices_from_quaternions_are_orthonormal() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let m = Matrix3::from_quaternion(&random_unit_quaternion(&mut rng));
        assert!(m.is_rotation_matrix(1e-12));
        assert_near(m.determinant(), 1.0, 1e-12);
    }
}

#[test]
fn identity_quaternion_gives_exact_identity_matrix() {
    assert_eq!(
        Matrix3::from_quaternion(&Quaternion::identity()),
        Matrix3::identity()
    );
}

// --- Euler round trips ---

#[test]
fn euler_matrix_round_trip_every_order() {
    let mut rng = rng();
    for order in EulerOrder::ALL {
        for _ in 0..SAMPLES {
            let e = random_euler(&mut rng, order);
            let back = Euler::from_matrix(&Matrix3::from_euler(&e), order);
            assert!(
                back.approx_eq(&e, 1e-9),
                "{} came back as {}",
                e,
                back
            );
        }
    }
}

#[test]
fn euler_quaternion_matrix_agree_every_order() {
    let mut rng = rng();
    for order in EulerOrder::ALL {
        for _ in 0..SAMPLES {
            let e = random_euler(&mut rng, order);
            let via_quaternion = Matrix3::from_quaternion(&Quaternion::from_euler(&e));
            assert_matrix3_near(&via_quaternion, &Matrix3::from_euler(&e), 1e-14);
        }
    }
}

#[test]
fn gimbal_lock_preserves_the_rotation() {
    for order in EulerOrder::ALL {
        let locked = match order {
            EulerOrder::XYZ | EulerOrder::ZYX => Euler::new(0.4, HALF_PI, 0.9, order),
            EulerOrder::YXZ | EulerOrder::ZXY => Euler::new(-HALF_PI, 0.4, 0.9, order),
            EulerOrder::XZY | EulerOrder::YZX => Euler::new(0.4, 0.9, HALF_PI, order),
        };
        let m = locked.to_matrix();
        let e = Euler::from_matrix(&m, order);
        assert!(e.to_vector3().is_finite());
        assert_matrix3_near(&e.to_matrix(), &m, 1e-12);
    }
}

// --- Normalization and interpolation ---

#[test]
fn normalize_is_idempotent() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let q = Quaternion::new(rng.f64() * 10.0, rng.f64(), -rng.f64(), rng.f64() + 0.5);
        let once = q.normalize();
        let twice = once.normalize();
        assert_quat_near(&once, &twice, 1e-15);
        assert_near(once.length(), 1.0, 1e-15);
    }
}

#[test]
fn zero_quaternion_normalizes_to_identity() {
    assert_eq!(
        Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(),
        Quaternion::identity()
    );
}

#[test]
fn slerp_hits_both_endpoints() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let a = random_unit_quaternion(&mut rng);
        let b = random_unit_quaternion(&mut rng);
        assert_eq!(a.slerp(&b, 0.0), a);
        assert_eq!(a.slerp(&b, 1.0), b);
        assert_quat_near(&a.slerp(&a, 0.5), &a, 1e-15);
    }
}

#[test]
fn slerp_stays_on_the_unit_sphere() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let a = random_unit_quaternion(&mut rng);
        let b = random_unit_quaternion(&mut rng);
        let t = rng.f64();
        assert_near(a.slerp(&b, t).length(), 1.0, 1e-12);
    }
}

// --- Axis-angle and vector pairs ---

#[test]
fn degenerate_axis_angle_uses_x_axis() {
    let aa = AxisAngle::from_quaternion(&Quaternion::identity());
    assert_eq!(aa.axis, Vector3::x_axis());
    assert_eq!(aa.angle, 0.0);
}

#[test]
fn axis_angle_round_trip() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let axis = Vector3::random_direction_with_rng(&mut rng);
        let angle = 0.01 + rng.f64() * (PI - 0.02);
        let back = AxisAngle::new(axis, angle).to_quaternion().to_axis_angle();
        assert_vec3_near(&back.axis, &axis, 1e-10);
        assert_near(back.angle, angle, 1e-12);
    }
}

#[test]
fn from_two_vectors_same_and_opposite() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let u = Vector3::random_direction_with_rng(&mut rng);
        let v = Vector3::random_direction_with_rng(&mut rng);

        assert_quat_near(&Quaternion::from_two_vectors(&u, &u), &Quaternion::identity(), 1e-15);

        let flip = Quaternion::from_two_vectors(&u, &-u);
        assert_vec3_near(&flip.rotate_vector(&u), &-u, 1e-12);

        let q = Quaternion::from_two_vectors(&u, &v);
        assert_vec3_near(&q.rotate_vector(&u), &v, 1e-10);
    }
}

#[test]
fn quarter_turn_about_z() {
    let q = Quaternion::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), HALF_PI));
    let v = q.rotate_vector(&Vector3::x_axis());
    assert_vec3_near(&v, &Vector3::y_axis(), 1e-15);

    let m = Matrix3::from_axis_angle(&AxisAngle::new(Vector3::z_axis(), HALF_PI));
    assert_vec3_near(&(m * Vector3::x_axis()), &Vector3::y_axis(), 1e-15);
}

// --- Matrix4 ---

#[test]
fn matrix4_inverse_undoes_transform() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let rotation = Matrix3::from_quaternion(&random_unit_quaternion(&mut rng));
        let m = Matrix4::identity()
            .set_rotation(&rotation)
            .set_translation(&Vector3::random_with_rng(&mut rng));
        let inverse = m.inverse().unwrap();
        let p = Vector3::random_with_rng(&mut rng);
        let back = p.transform_point(&m).transform_point(&inverse);
        assert_vec3_near(&back, &p, 1e-12);
        assert_ulp_lt!((m * inverse).get(3, 3).unwrap(), 1.0, 64);
    }
}
