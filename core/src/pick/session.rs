//! Modal point picking.
//!
//! A [`PickSession`] takes over a viewport, collects surface picks until its
//! constructor has enough of them, then releases the viewport and runs the
//! constructor. The right mouse button cancels at any point. The session
//! holds its viewport handle for its whole lifetime: a terminal transition
//! restores what `begin` changed, and dropping a session that is still
//! picking cancels it the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::viewport::{ListenerId, SelectionMode, Viewport};
use crate::construct::{ConstructionError, Constructor, PickedPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickPhase {
    Idle,
    Picking,
    Completed,
    Cancelled,
}

impl PickPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PickPhase::Completed | PickPhase::Cancelled)
    }
}

/// Mouse input delivered by the viewport while picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickEvent {
    /// Left button pressed. `hit` is None when no surface was under the cursor.
    Primary { hit: Option<PickedPoint> },
    /// Right button released.
    Secondary,
}

/// Result of feeding one event to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum PickStatus<T> {
    /// Still collecting picks.
    Pending,
    /// Enough picks were collected and the constructor ran.
    Completed(Result<T, ConstructionError>),
    /// Picking was abandoned; nothing was constructed.
    Cancelled,
}

impl<T> PickStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, PickStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("another pick session is already active on this viewport")]
    SessionActive,
    #[error("pick session already started (phase {0:?})")]
    NotIdle(PickPhase),
    #[error("pick session is not picking (phase {0:?})")]
    NotPicking(PickPhase),
}

pub struct PickSession<V: Viewport, C: Constructor> {
    viewport: V,
    constructor: C,
    points: Vec<PickedPoint>,
    saved_mode: Option<SelectionMode>,
    listener: Option<ListenerId>,
    phase: PickPhase,
}

impl<V: Viewport, C: Constructor> PickSession<V, C> {
    pub fn new(viewport: V, constructor: C) -> Self {
        let arity = constructor.arity();
        Self {
            viewport,
            constructor,
            points: Vec::with_capacity(arity),
            saved_mode: None,
            listener: None,
            phase: PickPhase::Idle,
        }
    }

    pub fn phase(&self) -> PickPhase {
        self.phase
    }

    /// Picks collected so far.
    pub fn points(&self) -> &[PickedPoint] {
        &self.points
    }

    /// Number of picks the constructor needs.
    pub fn required(&self) -> usize {
        self.constructor.arity()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Take over the viewport and start picking.
    ///
    /// Rejected without touching the viewport when another session already
    /// owns it.
    pub fn begin(&mut self) -> Result<(), PickError> {
        if self.phase != PickPhase::Idle {
            return Err(PickError::NotIdle(self.phase));
        }
        if self.viewport.is_editing() {
            warn!("pick session rejected: viewport is already being edited");
            return Err(PickError::SessionActive);
        }

        self.viewport.set_editing(true);
        self.saved_mode = self.viewport.selection_mode();
        if self.saved_mode.is_some() {
            self.viewport.set_selection_mode(SelectionMode::Off);
        }
        let listener = self.viewport.add_pick_listener();
        self.listener = Some(listener);
        self.phase = PickPhase::Picking;
        info!(required = self.required(), %listener, "pick session started");
        Ok(())
    }

    /// Feed one viewport event to a picking session.
    pub fn handle(&mut self, event: PickEvent) -> Result<PickStatus<C::Output>, PickError> {
        if self.phase != PickPhase::Picking {
            return Err(PickError::NotPicking(self.phase));
        }

        match event {
            PickEvent::Primary { hit: None } => Ok(PickStatus::Pending),
            PickEvent::Primary { hit: Some(pick) } => {
                self.points.push(pick);
                debug!(collected = self.points.len(), required = self.required(), point = ?pick.point, "point picked");
                if self.points.len() < self.required() {
                    return Ok(PickStatus::Pending);
                }

                self.finish(PickPhase::Completed);
                let result = self.constructor.construct(&self.points);
                match &result {
                    Ok(_) => info!("pick session completed"),
                    Err(e) => warn!(kind = ?e.kind, "construction failed: {}", e),
                }
                Ok(PickStatus::Completed(result))
            }
            PickEvent::Secondary => {
                self.points.clear();
                self.finish(PickPhase::Cancelled);
                info!("pick session cancelled");
                Ok(PickStatus::Cancelled)
            }
        }
    }

    /// Begin, then pump `events` until the session ends.
    ///
    /// Returns `Pending` if the events run out first; the session then
    /// stays `Picking` and can be fed more events with [`PickSession::handle`].
    pub fn run<I>(&mut self, events: I) -> Result<PickStatus<C::Output>, PickError>
    where
        I: IntoIterator<Item = PickEvent>,
    {
        self.begin()?;
        for event in events {
            let status = self.handle(event)?;
            if !status.is_pending() {
                return Ok(status);
            }
        }
        Ok(PickStatus::Pending)
    }

    /// Undo everything `begin` did to the viewport.
    fn finish(&mut self, phase: PickPhase) {
        if let Some(id) = self.listener.take() {
            self.viewport.remove_pick_listener(id);
        }
        if let Some(mode) = self.saved_mode.take() {
            self.viewport.set_selection_mode(mode);
        }
        self.viewport.set_editing(false);
        self.phase = phase;
    }
}

impl<V: Viewport, C: Constructor> Drop for PickSession<V, C> {
    fn drop(&mut self) {
        if self.phase == PickPhase::Picking {
            warn!(collected = self.points.len(), "pick session dropped while picking; cancelling");
            self.points.clear();
            self.finish(PickPhase::Cancelled);
        }
    }
}
