#![forbid(unsafe_code)]

//! Core: geometry, glyph width classification, size providers and OS signal hooks.

pub mod geometry;
pub mod logging;
pub mod signals;
pub mod size;
pub mod width;

pub use geometry::{Rect, Size, capitalize, clamp, clamp_and_round};
pub use signals::{OsSignal, SignalGuard};
pub use size::SizeProvider;
pub use width::{is_full_width, is_full_width_str, strip_style_codes, text_width};

#[cfg(feature = "tracing")]
pub use logging::{debug, warn};
