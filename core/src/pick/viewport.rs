//! The viewport surface a pick session drives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Selection feedback mode of the scene's selection node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Clicks select and highlight objects.
    On,
    /// Clicks pass through without touching the selection.
    Off,
}

/// Handle for a registered pick-event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a pick session needs from the 3D view it runs against.
pub trait Viewport {
    /// Current selection mode, or None when the scene has no selection node.
    fn selection_mode(&self) -> Option<SelectionMode>;

    /// Set the selection mode. Ignored when the scene has no selection node.
    fn set_selection_mode(&mut self, mode: SelectionMode);

    /// Whether an interactive edit (such as a pick session) owns the view.
    fn is_editing(&self) -> bool;

    /// Enter or leave editing: mouse events go to the scene and the
    /// surrounding form is disabled while editing.
    fn set_editing(&mut self, editing: bool);

    /// Start delivering mouse button events to a new listener.
    fn add_pick_listener(&mut self) -> ListenerId;

    /// Stop delivering events to `id`. Unknown ids are ignored.
    fn remove_pick_listener(&mut self, id: ListenerId);
}

/// In-memory viewport state, used by the backend for each connected view.
#[derive(Debug, Clone)]
pub struct SceneViewport {
    selection_mode: Option<SelectionMode>,
    editing: bool,
    listeners: Vec<ListenerId>,
}

impl SceneViewport {
    pub fn new() -> Self {
        Self::with_selection_mode(Some(SelectionMode::On))
    }

    pub fn with_selection_mode(selection_mode: Option<SelectionMode>) -> Self {
        Self {
            selection_mode,
            editing: false,
            listeners: Vec::new(),
        }
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}

impl Default for SceneViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport for SceneViewport {
    fn selection_mode(&self) -> Option<SelectionMode> {
        self.selection_mode
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        if let Some(current) = self.selection_mode.as_mut() {
            *current = mode;
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    fn add_pick_listener(&mut self) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push(id);
        id
    }

    fn remove_pick_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

impl<T: Viewport + ?Sized> Viewport for &mut T {
    fn selection_mode(&self) -> Option<SelectionMode> {
        (**self).selection_mode()
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        (**self).set_selection_mode(mode)
    }

    fn is_editing(&self) -> bool {
        (**self).is_editing()
    }

    fn set_editing(&mut self, editing: bool) {
        (**self).set_editing(editing)
    }

    fn add_pick_listener(&mut self) -> ListenerId {
        (**self).add_pick_listener()
    }

    fn remove_pick_listener(&mut self, id: ListenerId) {
        (**self).remove_pick_listener(id)
    }
}

/// Cloneable handle to a viewport shared between its owner and a session.
#[derive(Debug, Default)]
pub struct SharedViewport<T>(Arc<RwLock<T>>);

impl<T> Clone for SharedViewport<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> SharedViewport<T> {
    pub fn new(viewport: T) -> Self {
        Self(Arc::new(RwLock::new(viewport)))
    }

    // Poisoning is ignored; the guarded state is plain flags
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Viewport> Viewport for SharedViewport<T> {
    fn selection_mode(&self) -> Option<SelectionMode> {
        self.read().selection_mode()
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.write().set_selection_mode(mode)
    }

    fn is_editing(&self) -> bool {
        self.read().is_editing()
    }

    fn set_editing(&mut self, editing: bool) {
        self.write().set_editing(editing)
    }

    fn add_pick_listener(&mut self) -> ListenerId {
        self.write().add_pick_listener()
    }

    fn remove_pick_listener(&mut self, id: ListenerId) {
        self.write().remove_pick_listener(id)
    }
}
