use super::{ApproxEq, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An oriented coordinate system: an origin plus two orthonormal directions.
///
/// `primary` is the main axis (the local Z of anything placed with this
/// frame) and `secondary` fixes the rotation about it (the local X).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point3,
    pub primary: Vector3,
    pub secondary: Vector3,
}

impl Frame {
    pub fn new(origin: Point3, primary: Vector3, secondary: Vector3) -> Self {
        Self { origin, primary, secondary }
    }

    /// World frame: origin at zero, primary = +Z, secondary = +X.
    pub fn canonical() -> Self {
        Self::new(Point3::origin(), Vector3::z(), Vector3::x())
    }

    /// Both directions unit length and perpendicular, within tolerance.
    pub fn is_orthonormal(&self) -> bool {
        self.primary.norm().approx_eq(&1.0)
            && self.secondary.norm().approx_eq(&1.0)
            && self.primary.dot(&self.secondary).approx_eq(&0.0)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::canonical()
    }
}
