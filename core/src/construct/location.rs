//! Placement from a single surface pick.

use super::{ConstructionError, Constructor, FailureCause, PickedPoint};
use crate::geometry::{Placement, EPSILON};

/// Places an object at a picked surface point, rotating it by
/// `angle_degrees` about the surface normal at that point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceLocation {
    pub angle_degrees: f64,
}

impl SurfaceLocation {
    pub fn new(angle_degrees: f64) -> Self {
        Self { angle_degrees }
    }
}

impl Constructor for SurfaceLocation {
    type Output = Placement;

    fn arity(&self) -> usize {
        1
    }

    fn construct(&self, picks: &[PickedPoint]) -> Result<Placement, ConstructionError> {
        let [pick] = picks else {
            return Err(FailureCause::Other(format!("expected 1 point, got {}", picks.len())).into());
        };
        if !self.angle_degrees.is_finite() {
            return Err(FailureCause::BadAngle.into());
        }
        let normal = pick.normal.ok_or(FailureCause::NullVector)?;
        // Largest component, not the norm: the norm of a huge normal overflows
        if !normal.iter().all(|c| c.is_finite()) || normal.amax() < EPSILON {
            return Err(FailureCause::NullVector.into());
        }
        Placement::from_axis_angle(pick.point, normal, self.angle_degrees.to_radians())
            .ok_or_else(|| FailureCause::NullVector.into())
    }
}
