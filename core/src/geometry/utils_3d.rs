//! 3D plane helpers for constructions that work in a local 2D frame.

use super::{Point3, Vector3};

/// A plane with an in-plane orthonormal basis.
///
/// `u` and `v` span the plane and `u × v = normal`, so 2D coordinates
/// expressed in `(u, v)` keep the winding they have around `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
    pub u: Vector3,
    pub v: Vector3,
}

impl Plane {
    /// Create a plane from origin, normal and a direction lying in the plane.
    /// Returns None when the normal is null or `u_hint` is parallel to it.
    pub fn new(origin: Point3, normal: Vector3, u_hint: Vector3) -> Option<Self> {
        let normal = normal.try_normalize(f64::EPSILON)?;
        let u = (u_hint - normal * normal.dot(&u_hint)).try_normalize(f64::EPSILON)?;
        let v = normal.cross(&u);
        Some(Self { origin, normal, u, v })
    }

    /// Plane through three points, normal oriented by the winding
    /// `p0 → p1 → p2` and `u` pointing from `p0` to `p1`.
    pub fn through_points(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Self> {
        let a = p1 - p0;
        let b = p2 - p0;
        Self::new(*p0, a.cross(&b), a)
    }

    /// Signed distance from a point to this plane.
    /// Positive = point is on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Express a point in the plane's 2D coordinates (projecting it first).
    pub fn to_local(&self, point: &Point3) -> [f64; 2] {
        let d = point - self.origin;
        [d.dot(&self.u), d.dot(&self.v)]
    }

    /// Lift 2D plane coordinates back into world space.
    pub fn to_world(&self, local: [f64; 2]) -> Point3 {
        self.origin + self.u * local[0] + self.v * local[1]
    }
}
