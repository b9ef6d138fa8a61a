use super::placement::DEFAULT_AXIS;
use super::*;
use approx::assert_relative_eq;

/// Small deterministic xorshift so round-trips cover many orientations.
struct Xorshift(u64);

impl Xorshift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }

    fn unit_vector(&mut self) -> Vector3 {
        loop {
            let v = Vector3::new(self.next_f64(), self.next_f64(), self.next_f64());
            if v.norm() > 0.1 {
                return v.normalize();
            }
        }
    }

    fn frame(&mut self) -> Frame {
        let primary = self.unit_vector();
        loop {
            let hint = self.unit_vector();
            let secondary = hint - primary * primary.dot(&hint);
            if secondary.norm() > 0.1 {
                let origin = Point3::new(self.next_f64() * 100.0, self.next_f64() * 100.0, self.next_f64() * 100.0);
                return Frame::new(origin, primary, secondary.normalize());
            }
        }
    }
}

#[test]
fn test_identity_frame_uses_default_axis() {
    let placement = derive_placement(&Frame::canonical());
    assert_eq!(placement.axis, DEFAULT_AXIS);
    assert_eq!(placement.angle, 0.0);
    assert_eq!(placement.position, Point3::origin());
}

#[test]
fn test_position_passes_through() {
    let frame = Frame::new(Point3::new(3.0, -4.0, 5.5), Vector3::z(), Vector3::x());
    let placement = derive_placement(&frame);
    assert_eq!(placement.position, frame.origin);
}

#[test]
fn test_quarter_turn_about_z() {
    // X rotated onto Y, Z unchanged
    let frame = Frame::new(Point3::origin(), Vector3::z(), Vector3::y());
    let placement = derive_placement(&frame);
    assert_relative_eq!(placement.axis, Vector3::z(), epsilon = 1e-12);
    assert_relative_eq!(placement.angle_degrees(), 90.0, epsilon = 1e-9);
}

#[test]
fn test_half_turn_keeps_unit_axis() {
    let frame = Frame::new(Point3::origin(), -Vector3::z(), Vector3::x());
    let placement = derive_placement(&frame);
    assert_relative_eq!(placement.axis.norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(placement.angle, std::f64::consts::PI, epsilon = 1e-9);
    assert_relative_eq!(placement.rotate_vector(&Vector3::z()), -Vector3::z(), epsilon = 1e-9);
    assert_relative_eq!(placement.rotate_vector(&Vector3::x()), Vector3::x(), epsilon = 1e-9);
}

#[test]
fn test_randomized_frames_roundtrip() {
    let mut rng = Xorshift(0x9E37_79B9_7F4A_7C15);
    for _ in 0..250 {
        let frame = rng.frame();
        assert!(frame.is_orthonormal());

        let placement = derive_placement(&frame);
        assert!((placement.axis.norm() - 1.0).abs() < 1e-9);
        assert!(placement.angle >= 0.0 && placement.angle <= std::f64::consts::PI + 1e-12);

        let primary = placement.rotate_vector(&Vector3::z());
        let secondary = placement.rotate_vector(&Vector3::x());
        assert!(primary.approx_eq(&frame.primary), "primary mismatch for {:?}", frame);
        assert!(secondary.approx_eq(&frame.secondary), "secondary mismatch for {:?}", frame);
        assert_eq!(placement.position, frame.origin);
    }
}

#[test]
fn test_transform_point_places_local_origin() {
    let frame = Frame::new(Point3::new(1.0, 2.0, 3.0), Vector3::x(), Vector3::y());
    let placement = derive_placement(&frame);
    let moved = placement.transform_point(&Point3::new(0.0, 0.0, 2.0));
    assert_relative_eq!(moved, Point3::new(3.0, 2.0, 3.0), epsilon = 1e-9);
}

#[test]
fn test_quaternion_components() {
    let placement = Placement::from_axis_angle(Point3::origin(), Vector3::new(0.0, 0.0, 2.0), std::f64::consts::PI).unwrap();
    let q = placement.quaternion();
    assert_relative_eq!(q[2].abs(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(q[3], 0.0, epsilon = 1e-12);
    assert!(Placement::from_axis_angle(Point3::origin(), Vector3::zeros(), 1.0).is_none());
}

#[test]
fn test_normalize_degrees() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_relative_eq!(normalize_degrees(-90.0), 270.0);
    assert_relative_eq!(normalize_degrees(720.5), 0.5, epsilon = 1e-9);
    assert!(normalize_degrees(-1e-18) < 360.0);
}

#[test]
fn test_from_axis_angle_rejects_unusable_input() {
    let origin = Point3::origin();
    assert!(Placement::from_axis_angle(origin, Vector3::new(f64::INFINITY, 0.0, 0.0), 1.0).is_none());
    assert!(Placement::from_axis_angle(origin, Vector3::new(f64::NAN, 1.0, 0.0), 1.0).is_none());
    assert!(Placement::from_axis_angle(origin, Vector3::z(), f64::NAN).is_none());

    let huge = Placement::from_axis_angle(origin, Vector3::new(0.0, 1e308, 1e308), 0.5).unwrap();
    let half = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(huge.axis, Vector3::new(0.0, half, half), epsilon = 1e-12);
    assert!(huge.quaternion().iter().all(|c| c.is_finite()));
}

#[test]
fn test_unit_direction() {
    assert_relative_eq!(unit_direction(&Vector3::new(0.0, 3.0, 4.0)).unwrap(), Vector3::new(0.0, 0.6, 0.8));
    assert_relative_eq!(unit_direction(&Vector3::new(-1e-300, 0.0, 0.0)).unwrap(), -Vector3::x());
    assert!(unit_direction(&Vector3::zeros()).is_none());
    assert!(unit_direction(&Vector3::new(f64::NEG_INFINITY, 0.0, 0.0)).is_none());
}

#[test]
fn test_zero_axis_rotation_falls_back_to_default_axis() {
    // A zeroed axis can only arrive through deserialization or direct construction
    let placement = Placement {
        position: Point3::new(1.0, 0.0, 0.0),
        axis: Vector3::zeros(),
        angle: std::f64::consts::FRAC_PI_2,
    };
    assert!(placement.quaternion().iter().all(|c| c.is_finite()));
    assert_relative_eq!(placement.rotate_vector(&Vector3::x()), Vector3::y(), epsilon = 1e-12);
    assert_relative_eq!(
        placement.transform_point(&Point3::origin()),
        Point3::new(1.0, 0.0, 0.0),
        epsilon = 1e-12
    );

    let identity = Placement { axis: Vector3::zeros(), angle: 0.0, ..Placement::identity() };
    assert_relative_eq!(identity.rotate_vector(&Vector3::x()), Vector3::x(), epsilon = 1e-12);
}
