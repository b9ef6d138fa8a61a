//! Classification of geometric construction failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Low-level status reported by a construction routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    Done,
    ConfusedPoints,
    NegativeRadius,
    ColinearPoints,
    IntersectionError,
    NullAxis,
    NullAngle,
    NullRadius,
    InvertAxis,
    BadAngle,
    InvertRadius,
    NullFocusLength,
    NullVector,
    BadEquation,
    /// Any status the classifier has no dedicated entry for.
    Other(String),
}

/// Stable kind of a construction outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionErrorKind {
    Success,
    CoincidentPoints,
    NegativeRadius,
    CollinearPoints,
    IntersectionFailure,
    UndefinedAxis,
    InvalidAngle,
    ZeroRadius,
    InvalidAxisDirection,
    InconsistentRadius,
    ZeroFocalLength,
    ZeroVector,
    InvalidEquationCoefficients,
    UnknownFailure,
}

impl ConstructionErrorKind {
    /// Fixed human readable description of this kind.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Construction was successful",
            Self::CoincidentPoints => "Two points are coincident",
            Self::NegativeRadius => "Radius value is negative",
            Self::CollinearPoints => "Three points are collinear",
            Self::IntersectionFailure => "Intersection cannot be computed",
            Self::UndefinedAxis => "Axis is undefined",
            Self::InvalidAngle => "Angle value is invalid (usually null)",
            Self::ZeroRadius => "Radius is null",
            Self::InvalidAxisDirection => "Axis value is invalid",
            Self::InconsistentRadius => "Radius value is incorrect (usually with respect to another radius)",
            Self::ZeroFocalLength => "Focal distance is null",
            Self::ZeroVector => "Vector is null",
            Self::InvalidEquationCoefficients => "Coefficients are incorrect (applies to the equation of a geometric object)",
            Self::UnknownFailure => "Creation of geometry failed",
        }
    }
}

/// Map a failure cause to its kind and fixed message.
pub fn classify(cause: &FailureCause) -> (ConstructionErrorKind, &'static str) {
    let kind = match cause {
        FailureCause::Done => ConstructionErrorKind::Success,
        FailureCause::ConfusedPoints => ConstructionErrorKind::CoincidentPoints,
        FailureCause::NegativeRadius => ConstructionErrorKind::NegativeRadius,
        FailureCause::ColinearPoints => ConstructionErrorKind::CollinearPoints,
        FailureCause::IntersectionError => ConstructionErrorKind::IntersectionFailure,
        FailureCause::NullAxis => ConstructionErrorKind::UndefinedAxis,
        FailureCause::NullAngle => ConstructionErrorKind::InvalidAngle,
        FailureCause::NullRadius => ConstructionErrorKind::ZeroRadius,
        FailureCause::InvertAxis => ConstructionErrorKind::InvalidAxisDirection,
        // Both angle statuses share the kind; the message differs
        FailureCause::BadAngle => return (ConstructionErrorKind::InvalidAngle, "Angle value is invalid"),
        FailureCause::InvertRadius => ConstructionErrorKind::InconsistentRadius,
        FailureCause::NullFocusLength => ConstructionErrorKind::ZeroFocalLength,
        FailureCause::NullVector => ConstructionErrorKind::ZeroVector,
        FailureCause::BadEquation => ConstructionErrorKind::InvalidEquationCoefficients,
        FailureCause::Other(_) => ConstructionErrorKind::UnknownFailure,
    };
    (kind, kind.message())
}

/// A classified construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ConstructionError {
    pub kind: ConstructionErrorKind,
    pub message: &'static str,
}

impl From<FailureCause> for ConstructionError {
    fn from(cause: FailureCause) -> Self {
        let (kind, message) = classify(&cause);
        Self { kind, message }
    }
}

impl From<ConstructionErrorKind> for ConstructionError {
    fn from(kind: ConstructionErrorKind) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}
