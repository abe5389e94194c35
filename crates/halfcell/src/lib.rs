#![forbid(unsafe_code)]

//! halfcell public facade crate.
//!
//! Re-exports the canvas, style compiler and runtime loop, and offers a
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use halfcell_core::{OsSignal, Rect, Size, SizeProvider, is_full_width, text_width};

// --- Render re-exports -----------------------------------------------------

pub use halfcell_render::{Canvas, CanvasOptions, FrameBuffer, FrameTiming, RenderMode};

// --- Style re-exports ------------------------------------------------------

pub use halfcell_style::{AnsiKeywords, CompiledStyle, KeywordTable, StyleError, Styler};

// --- Runtime re-exports ----------------------------------------------------

pub use halfcell_runtime::{
    Component, ComponentId, EventEmitter, EventPayload, KeyPress, LoopHandle, OncePolicy, Tui,
    TuiConfig, TuiEvent,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for halfcell apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while writing to the terminal.
    Io(std::io::Error),
    /// A style descriptor failed to compile.
    Style(StyleError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Style(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Style(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StyleError> for Error {
    fn from(err: StyleError) -> Self {
        Self::Style(err)
    }
}

/// Standard result type for halfcell APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnsiKeywords, Canvas, CanvasOptions, Component, Error, KeyPress, Rect, Result, Size,
        SizeProvider, Styler, Tui, TuiConfig, TuiEvent,
    };

    pub use crate::{core, render, runtime, style};
}

pub use halfcell_core as core;
pub use halfcell_render as render;
pub use halfcell_runtime as runtime;
pub use halfcell_style as style;
