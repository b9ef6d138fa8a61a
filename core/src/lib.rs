pub mod geometry;
pub mod construct;
pub mod pick;

pub use construct::{CircleResult, ConstructionError, ConstructionErrorKind, Constructor, PickedPoint};
pub use geometry::{derive_placement, Frame, Placement};
pub use pick::{PickEvent, PickSession, PickStatus, SceneViewport, SharedViewport, Viewport};

pub fn version() -> &'static str {
    "0.1.0"
}
