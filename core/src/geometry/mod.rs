use nalgebra as na;

pub type Point3 = na::Point3<f64>;
pub type Vector3 = na::Vector3<f64>;
pub type Rotation3 = na::Rotation3<f64>;
pub type UnitQuaternion = na::UnitQuaternion<f64>;

/// Distance below which two points are the same point.
pub const EPSILON: f64 = 1e-9;

/// Rotation angle (radians) below which a rotation is the identity.
pub const ANGLE_EPSILON: f64 = 1e-9;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point3 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

pub mod intersection;
pub use intersection::*;

pub mod utils_3d;
pub use utils_3d::Plane;

pub mod frame;
pub use frame::Frame;

pub mod placement;
pub use placement::{derive_placement, Placement};

#[cfg(test)]
mod tests_placement;

/// Unit vector along `v`, or None for a null or non-finite vector.
///
/// Scales by the largest component first so that huge inputs do not
/// overflow the norm.
pub fn unit_direction(v: &Vector3) -> Option<Vector3> {
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }
    let scale = v.amax();
    if scale == 0.0 {
        return None;
    }
    let unit = (v / scale).normalize();
    if unit.iter().all(|c| c.is_finite()) && unit.norm().approx_eq(&1.0) {
        Some(unit)
    } else {
        None
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
