//! Circle through three points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConstructionError, Constructor, FailureCause, PickedPoint};
use crate::geometry::{
    circumcenter_2d, derive_placement, normalize_degrees, ApproxEq, Frame, Placement, Plane, Point3,
    EPSILON,
};

/// A circular arc through three points.
///
/// Angles are in degrees. The parameterisation starts at `p0` (angle 0,
/// along `orientation.secondary`) and runs counter-clockwise about
/// `orientation.primary`, which is the winding of `p0 → p1 → p2`, so the arc
/// from `start_angle` to `end_angle` passes through `p1` and ends at `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleResult {
    pub center: Point3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub orientation: Frame,
    pub placement: Placement,
}

/// Constructor for [`CircleResult`] from three picks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreePointCircle;

impl Constructor for ThreePointCircle {
    type Output = CircleResult;

    fn arity(&self) -> usize {
        3
    }

    fn construct(&self, picks: &[PickedPoint]) -> Result<CircleResult, ConstructionError> {
        match picks {
            [p0, p1, p2] => circle_from_three_points(&p0.point, &p1.point, &p2.point),
            _ => Err(FailureCause::Other(format!("expected 3 points, got {}", picks.len())).into()),
        }
    }
}

/// Build the circle through `p0`, `p1` and `p2`.
///
/// Checks run in order: any coincident pair, then collinearity. A
/// circumcenter that cannot be intersected, or that is not equidistant
/// from all three points, is reported as an intersection failure, as are
/// points whose distances overflow.
pub fn circle_from_three_points(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
) -> Result<CircleResult, ConstructionError> {
    if !(p0.coords.iter().chain(p1.coords.iter()).chain(p2.coords.iter())).all(|c| c.is_finite()) {
        return Err(FailureCause::Other("non-finite input point".into()).into());
    }

    if p0.approx_eq(p1) || p1.approx_eq(p2) || p0.approx_eq(p2) {
        return Err(FailureCause::ConfusedPoints.into());
    }

    // Finite points far enough apart can still overflow every distance
    let d01 = (p1 - p0).norm();
    let d02 = (p2 - p0).norm();
    if !d01.is_finite() || !d02.is_finite() || !(p2 - p1).norm().is_finite() {
        return Err(FailureCause::IntersectionError.into());
    }

    // Sine of the angle at p0; scale free so large and small inputs agree
    let cross = (p1 - p0).cross(&(p2 - p0));
    if cross.norm() < EPSILON * d01 * d02 {
        return Err(FailureCause::ColinearPoints.into());
    }

    let plane = Plane::through_points(p0, p1, p2).ok_or(FailureCause::ColinearPoints)?;
    let local = [plane.to_local(p0), plane.to_local(p1), plane.to_local(p2)];
    let center_2d =
        circumcenter_2d(local[0], local[1], local[2]).ok_or(FailureCause::IntersectionError)?;
    let center = plane.to_world(center_2d);

    let radius = (p0 - center).norm();
    let tolerance = EPSILON * radius.max(1.0);
    if !radius.is_finite()
        || radius < EPSILON
        || ((p1 - center).norm() - radius).abs() > tolerance
        || ((p2 - center).norm() - radius).abs() > tolerance
    {
        return Err(FailureCause::IntersectionError.into());
    }

    let x_dir = (p0 - center) / radius;
    let y_dir = plane.normal.cross(&x_dir);
    let to_end = p2 - center;
    let end_angle = normalize_degrees(to_end.dot(&y_dir).atan2(to_end.dot(&x_dir)).to_degrees());

    let orientation = Frame::new(center, plane.normal, x_dir);
    let placement = derive_placement(&orientation);
    debug!(?center, radius, end_angle, "constructed circle from three points");

    Ok(CircleResult {
        center,
        radius,
        start_angle: 0.0,
        end_angle,
        orientation,
        placement,
    })
}
