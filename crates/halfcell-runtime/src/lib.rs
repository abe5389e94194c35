#![forbid(unsafe_code)]

//! Runtime: deferred listener dispatch, cadence timers and the orchestration loop.
//!
//! # Role in halfcell
//! [`Tui`] owns a [`Canvas`](halfcell_render::Canvas) and drives it from two
//! cadences merged into one tick stream. Update ticks clear the screen to the
//! background style and draw every [`Component`] in z-order; render ticks
//! write the frame. Lifecycle notifications go through an [`EventEmitter`]
//! whose listeners run as deferred tasks on a [`TaskQueue`].

pub mod cadence;
pub mod component;
pub mod config;
pub mod emitter;
pub mod event;
pub mod task_queue;
pub mod tui;

pub use cadence::{CadenceKind, TickAck};
pub use component::{Component, ComponentId};
pub use config::TuiConfig;
pub use emitter::{Callback, EventEmitter, OncePolicy, Selector};
pub use event::{EventPayload, KeyPress, TuiEvent};
pub use task_queue::TaskQueue;
pub use tui::{LoopHandle, Tui};
