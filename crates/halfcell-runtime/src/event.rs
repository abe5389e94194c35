#![forbid(unsafe_code)]

//! Lifecycle events fired by the loop.

use halfcell_core::Size;
use halfcell_render::FrameTiming;

use crate::component::ComponentId;

/// Lifecycle event tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuiEvent {
    /// Components were drawn.
    Update,
    /// A frame was written; payload carries its timing.
    Render,
    /// The buffer was rebuilt for a new size.
    Resize,
    /// A key press reached the loop.
    KeyPress,
    /// A component was registered.
    AddComponent,
    /// A component was removed.
    RemoveComponent,
    /// The loop is shutting down.
    Close,
}

/// A key press forwarded by an input source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// Key name, e.g. `"c"`, `"up"`, `"return"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    /// Unmodified key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl+C.
    pub fn is_interrupt(&self) -> bool {
        self.ctrl && self.key == "c"
    }
}

/// Data carried alongside a [`TuiEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Timing(FrameTiming),
    Key(KeyPress),
    Size(Size),
    Component(ComponentId),
}

impl EventPayload {
    pub fn timing(&self) -> Option<&FrameTiming> {
        match self {
            Self::Timing(timing) => Some(timing),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&KeyPress> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<Size> {
        match self {
            Self::Size(size) => Some(*size),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<ComponentId> {
        match self {
            Self::Component(id) => Some(*id),
            _ => None,
        }
    }
}
