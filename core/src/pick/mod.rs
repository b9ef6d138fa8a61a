pub mod viewport;
pub use viewport::{ListenerId, SceneViewport, SelectionMode, SharedViewport, Viewport};

pub mod session;
pub use session::{PickError, PickEvent, PickPhase, PickSession, PickStatus};

#[cfg(test)]
mod tests_session;
