#![forbid(unsafe_code)]

//! Render kernel: packed half-cell slots, frame buffers, diffs and the canvas.
//!
//! # Role in halfcell
//! Components draw pixels, rectangles and text onto a [`Canvas`]. The canvas
//! keeps a [`FrameBuffer`] of [`CellSlot`]s plus a snapshot of the previous
//! frame, and each render writes either the whole screen or only the slots
//! that differ from the snapshot.

pub mod ansi;
pub mod canvas;
pub mod counting_writer;
pub mod diff;
pub mod frame_buffer;
pub mod slot;
pub mod timing;

pub use canvas::{Canvas, CanvasOptions, RenderMode};
pub use counting_writer::{CountingWriter, RenderStats};
pub use diff::SlotDiff;
pub use frame_buffer::FrameBuffer;
pub use slot::CellSlot;
pub use timing::FrameTiming;
