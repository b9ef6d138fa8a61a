//! Rigid placements and their derivation from oriented frames.

use nalgebra as na;
use serde::{Deserialize, Serialize};

use super::{unit_direction, Frame, Point3, Rotation3, UnitQuaternion, Vector3, ANGLE_EPSILON};

/// Axis reported for a rotation whose angle is (numerically) zero.
///
/// The rotation matrix carries no axis information in that case, so the
/// world Z axis is used.
pub const DEFAULT_AXIS: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// Position plus a rotation in axis/angle form.
///
/// `axis` is unit length and `angle` is in radians. Placements derived
/// from a frame have `angle` in `[0, π]`, and use [`DEFAULT_AXIS`] when the
/// rotation is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point3,
    pub axis: Vector3,
    pub angle: f64,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            axis: DEFAULT_AXIS,
            angle: 0.0,
        }
    }

    /// Placement from a raw axis and angle. Returns None for a null or
    /// non-finite axis, or a non-finite angle.
    pub fn from_axis_angle(position: Point3, axis: Vector3, angle: f64) -> Option<Self> {
        if !angle.is_finite() {
            return None;
        }
        let axis = unit_direction(&axis)?;
        Some(Self { position, axis, angle })
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Rotation part. A placement whose axis is unusable (e.g. zeroed in
    /// deserialized input) rotates about [`DEFAULT_AXIS`].
    pub fn rotation(&self) -> UnitQuaternion {
        let axis = unit_direction(&self.axis).unwrap_or(DEFAULT_AXIS);
        UnitQuaternion::from_axis_angle(&na::Unit::new_unchecked(axis), self.angle)
    }

    /// Rotation as quaternion components in `(x, y, z, w)` order.
    pub fn quaternion(&self) -> [f64; 4] {
        let q = self.rotation();
        [q.i, q.j, q.k, q.w]
    }

    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        self.rotation() * v
    }

    /// Map a point from the placed object's local space into world space.
    pub fn transform_point(&self, p: &Point3) -> Point3 {
        self.to_isometry() * p
    }

    pub fn to_isometry(&self) -> na::Isometry3<f64> {
        na::Isometry3::from_parts(na::Translation3::from(self.position.coords), self.rotation())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Placement that moves a canonically oriented object (Z up, X forward)
/// onto `frame`: rotating +Z gives `frame.primary`, rotating +X gives
/// `frame.secondary`, and the position is the frame origin.
///
/// The frame must already be orthonormal; the secondary direction is
/// re-orthogonalised against the primary only to absorb rounding.
pub fn derive_placement(frame: &Frame) -> Placement {
    debug_assert!(frame.is_orthonormal(), "frame directions must be orthonormal");

    let z = frame.primary.normalize();
    let x = (frame.secondary - z * z.dot(&frame.secondary)).normalize();
    let y = z.cross(&x);

    // The frame as a coordinate system maps world coordinates into frame
    // coordinates; rows of that matrix are the frame axes.
    let world_to_frame = Rotation3::from_matrix_unchecked(na::Matrix3::from_rows(&[
        x.transpose(),
        y.transpose(),
        z.transpose(),
    ]));
    let frame_to_world = world_to_frame.inverse();

    let rotation = UnitQuaternion::from_rotation_matrix(&frame_to_world);
    let (axis, angle) = match rotation.axis_angle() {
        Some((axis, angle)) if angle >= ANGLE_EPSILON => (axis.into_inner(), angle),
        _ => (DEFAULT_AXIS, 0.0),
    };

    Placement {
        position: frame.origin,
        axis,
        angle,
    }
}
