//! Geometry constructions driven by picked points.
//!
//! A [`Constructor`] declares how many picks it needs and turns exactly that
//! many [`PickedPoint`]s into a result or a classified [`ConstructionError`].
//! The pick session only knows this trait, so new constructions plug in
//! without touching the state machine.

use crate::geometry::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{classify, ConstructionError, ConstructionErrorKind, FailureCause};

pub mod circle;
pub use circle::{circle_from_three_points, CircleResult, ThreePointCircle};

pub mod location;
pub use location::SurfaceLocation;


/// A point hit on a surface in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickedPoint {
    pub point: Point3,
    /// Surface normal at the hit, when the viewport reports one.
    pub normal: Option<Vector3>,
}

impl PickedPoint {
    pub fn new(point: Point3) -> Self {
        Self { point, normal: None }
    }

    pub fn with_normal(point: Point3, normal: Vector3) -> Self {
        Self {
            point,
            normal: Some(normal),
        }
    }
}

impl From<Point3> for PickedPoint {
    fn from(point: Point3) -> Self {
        Self::new(point)
    }
}

/// A construction fed by a fixed number of picks.
pub trait Constructor {
    type Output;

    /// Number of picks needed before [`Constructor::construct`] runs.
    fn arity(&self) -> usize;

    /// Build the result from exactly `arity()` picks, in pick order.
    fn construct(&self, picks: &[PickedPoint]) -> Result<Self::Output, ConstructionError>;
}

/// Constructor backed by a closure.
pub struct FnConstructor<F> {
    arity: usize,
    f: F,
}

/// Wrap a closure as a [`Constructor`] needing `arity` picks.
pub fn from_fn<T, F>(arity: usize, f: F) -> FnConstructor<F>
where
    F: Fn(&[PickedPoint]) -> Result<T, ConstructionError>,
{
    FnConstructor { arity, f }
}

impl<T, F> Constructor for FnConstructor<F>
where
    F: Fn(&[PickedPoint]) -> Result<T, ConstructionError>,
{
    type Output = T;

    fn arity(&self) -> usize {
        self.arity
    }

    fn construct(&self, picks: &[PickedPoint]) -> Result<T, ConstructionError> {
        (self.f)(picks)
    }
}
