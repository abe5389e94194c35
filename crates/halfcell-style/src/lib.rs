#![forbid(unsafe_code)]

//! Style compilation for halfcell.
//!
//! # Role in halfcell
//! Components describe how text should look with symbolic keywords
//! (`"red"`, `"bold"`) or raw escape codes. This crate resolves those
//! descriptors through a [`KeywordTable`] into the concrete escape strings the
//! canvas writes in front of each styled half-cell.

pub mod descriptor;
pub mod error;
pub mod keyword;
pub mod styler;

pub use descriptor::{CompiledDescriptor, CompiledNode, StyleDescriptor, StyleNode};
pub use error::StyleError;
pub use keyword::{AnsiKeywords, KeywordTable};
pub use styler::{CompiledStyle, STYLE_RESET, Styler, compile_value, style_text};
