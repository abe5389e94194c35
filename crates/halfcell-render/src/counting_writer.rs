#![forbid(unsafe_code)]

//! Counting writer for tracking bytes emitted per render.
//!
//! The canvas writes every frame through a [`CountingWriter`] so the volume
//! of each render is observable; incremental renders should stay
//! proportional to the number of changed slots.
//!
//! ```
//! use halfcell_render::counting_writer::CountingWriter;
//! use std::io::Write;
//!
//! let mut writer = CountingWriter::new(Vec::new());
//! writer.write_all(b"Hello, world!").unwrap();
//! assert_eq!(writer.bytes_written(), 13);
//!
//! writer.reset_counter();
//! writer.write_all(b"Hi").unwrap();
//! assert_eq!(writer.bytes_written(), 2);
//! ```

use std::io::{self, Write};
use std::time::Duration;

use crate::canvas::RenderMode;

/// A write wrapper that counts bytes written.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes_written: u64,
}

impl<W> CountingWriter<W> {
    /// Wrap `inner`.
    #[inline]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Bytes written since the last reset.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Reset the byte counter to zero.
    #[inline]
    pub fn reset_counter(&mut self) {
        self.bytes_written = 0;
    }

    /// Reference to the wrapped writer.
    #[inline]
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Mutable reference to the wrapped writer.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.bytes_written += buf.len() as u64;
        Ok(())
    }
}

/// Statistics from one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Which mode the render used.
    pub mode: RenderMode,
    /// Bytes emitted for this frame, cursor hiding included.
    pub bytes_emitted: u64,
    /// Slots written (every slot for a full render).
    pub slots_written: usize,
    /// Time spent rendering.
    pub duration: Duration,
}

impl RenderStats {
    /// Bytes per written slot; 0.0 when nothing was written.
    #[inline]
    pub fn bytes_per_slot(&self) -> f64 {
        if self.slots_written == 0 {
            0.0
        } else {
            self.bytes_emitted as f64 / self.slots_written as f64
        }
    }
}

impl Default for RenderStats {
    fn default() -> Self {
        Self {
            mode: RenderMode::Full,
            bytes_emitted: 0,
            slots_written: 0,
            duration: Duration::ZERO,
        }
    }
}
