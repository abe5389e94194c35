#![forbid(unsafe_code)]

//! Canvas: drawing primitives on top of a frame buffer, plus rendering.
//!
//! The canvas owns the current [`FrameBuffer`] and the snapshot of the
//! previously rendered frame. [`Canvas::render`] picks a mode:
//!
//! - **Full**: cursor to the origin, then every row's slots concatenated,
//!   rows separated by a line advance. Used when there is no snapshot (first
//!   frame, after a resize, or with smart rendering off).
//! - **Incremental**: every slot that differs from the snapshot is emitted as
//!   a cursor move followed by the slot content. Nothing else is written.
//!
//! Every render hides the cursor first and finishes by copying the buffer into
//! the snapshot.
//!
//! # Usage
//!
//! ```
//! use halfcell_core::SizeProvider;
//! use halfcell_render::{Canvas, CanvasOptions};
//!
//! let mut canvas = Canvas::new(
//!     CanvasOptions::new(Vec::<u8>::new()).with_size(SizeProvider::fixed(2, 10)),
//! );
//! canvas.draw_text(0, 0, "hello", None);
//! canvas.render().unwrap();
//! ```

use std::io::{self, Write};
use std::mem;
use std::time::{Duration, Instant};

use halfcell_core::geometry::{Rect, Size};
use halfcell_core::size::SizeProvider;
use halfcell_core::width::{is_full_width, strip_style_codes};
use halfcell_style::CompiledStyle;

use crate::ansi::{self, HIDE_CURSOR, SHOW_CURSOR};
use crate::counting_writer::{CountingWriter, RenderStats};
use crate::diff::SlotDiff;
use crate::frame_buffer::FrameBuffer;
use crate::slot::CellSlot;
use crate::timing::FrameTiming;

/// Default interval between renders of the render cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(16);

/// How a render call wrote the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Every slot was written.
    Full,
    /// Only slots differing from the snapshot were written.
    Incremental,
}

/// Options for [`Canvas::new`].
pub struct CanvasOptions {
    writer: Box<dyn Write + Send>,
    size: SizeProvider,
    filler: String,
    smart_render: bool,
    refresh_interval: Duration,
}

impl CanvasOptions {
    /// Options writing to `writer`, sized by the live terminal.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            size: SizeProvider::default(),
            filler: " ".to_string(),
            smart_render: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Options writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Size source; re-evaluated on every fill and render.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<SizeProvider>) -> Self {
        self.size = size.into();
        self
    }

    /// Glyph used for empty space.
    #[must_use]
    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.filler = filler.into();
        self
    }

    /// Only redraw changes between frames (default on).
    #[must_use]
    pub fn with_smart_render(mut self, enabled: bool) -> Self {
        self.smart_render = enabled;
        self
    }

    /// Interval of the render cadence driving this canvas.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// A terminal-backed drawing surface.
pub struct Canvas {
    writer: CountingWriter<Box<dyn Write + Send>>,
    size: SizeProvider,
    filler: String,
    filler_is_full_width: bool,
    buffer: FrameBuffer,
    snapshot: Option<FrameBuffer>,
    smart_render: bool,
    refresh_interval: Duration,
    timing: FrameTiming,
    /// One-shot refill after the first incremental render has happened.
    refreshed: bool,
    cursor_hidden: bool,
    last_stats: RenderStats,
    scratch: String,
}

impl Canvas {
    /// Create a canvas and fill its buffer to the current size.
    pub fn new(options: CanvasOptions) -> Self {
        let filler_is_full_width = glyph_is_full_width(&options.filler);
        let mut canvas = Self {
            writer: CountingWriter::new(options.writer),
            size: options.size,
            filler: options.filler,
            filler_is_full_width,
            buffer: FrameBuffer::new(),
            snapshot: None,
            smart_render: options.smart_render,
            refresh_interval: options.refresh_interval,
            timing: FrameTiming::new(Instant::now()),
            refreshed: false,
            cursor_hidden: false,
            last_stats: RenderStats::default(),
            scratch: String::new(),
        };
        canvas.fill_buffer();
        canvas
    }

    /// Current size as reported by the size provider.
    #[inline]
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// The current frame buffer.
    #[inline]
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// The snapshot of the last rendered frame, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<&FrameBuffer> {
        self.snapshot.as_ref()
    }

    /// Filler glyph for empty space.
    #[inline]
    pub fn filler(&self) -> &str {
        &self.filler
    }

    /// Whether only changes are redrawn.
    #[inline]
    pub fn smart_render(&self) -> bool {
        self.smart_render
    }

    /// Toggle smart rendering.
    pub fn set_smart_render(&mut self, enabled: bool) {
        self.smart_render = enabled;
    }

    /// Interval of the render cadence.
    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Timing of the most recent render.
    #[inline]
    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Statistics of the most recent render.
    #[inline]
    pub fn last_stats(&self) -> &RenderStats {
        &self.last_stats
    }

    /// Bytes written by the most recent render.
    #[inline]
    pub fn last_frame_bytes(&self) -> u64 {
        self.last_stats.bytes_emitted
    }

    /// Whether the one-shot post-incremental refill already ran.
    #[inline]
    pub fn is_refreshed(&self) -> bool {
        self.refreshed
    }

    /// Drop the snapshot so the next render writes the full frame.
    pub fn invalidate_snapshot(&mut self) {
        self.snapshot = None;
    }

    /// Fill every slot that does not exist yet, reshaping to the current size.
    ///
    /// Slots that already hold content are left untouched. When the shape
    /// changes the snapshot is dropped, so the next render is full. Returns
    /// the number of slots filled.
    pub fn fill_buffer(&mut self) -> usize {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("fill_buffer").entered();

        let size = self.size.get();
        let shape = self.buffer.shape();
        let filled = self
            .buffer
            .conform(size, &self.filler, self.filler_is_full_width);
        if self.buffer.shape() != shape {
            self.snapshot = None;
        }
        filled
    }

    /// Write `value` at terminal `(column, row)`.
    ///
    /// Targets outside the buffer are ignored. A full-width value also
    /// blanks the half-cell of column `column + 1`.
    pub fn draw_pixel(
        &mut self,
        column: usize,
        row: usize,
        value: &str,
        style: Option<&CompiledStyle>,
    ) {
        let (slot, half) = CellSlot::locate(column);
        if self.buffer.get(row, slot).is_none() {
            return;
        }

        if glyph_is_full_width(value) {
            if half == 1 {
                if let Some(next) = self.buffer.get_mut(row, slot + 1) {
                    next.set_half(0, "");
                }
            } else if let Some(cell) = self.buffer.get_mut(row, slot) {
                cell.set_half(1, "");
            }
        }

        let Some(cell) = self.buffer.get_mut(row, slot) else {
            return;
        };
        match style {
            Some(style) => cell.set_half(half, &style.apply(value)),
            None => cell.set_half(half, value),
        }
    }

    /// Fill `rect` with `value`.
    pub fn draw_rectangle(&mut self, rect: Rect, value: &str, style: Option<&CompiledStyle>) {
        for row in rect.y as usize..rect.bottom() as usize {
            for column in rect.x as usize..rect.right() as usize {
                self.draw_pixel(column, row, value, style);
            }
        }
    }

    /// Draw `text` starting at `(column, row)`.
    ///
    /// Line breaks move to the next row at the starting column. Each
    /// character advances one column, plus one more after a full-width
    /// character.
    pub fn draw_text(
        &mut self,
        column: usize,
        row: usize,
        text: &str,
        style: Option<&CompiledStyle>,
    ) {
        let mut glyph = [0u8; 4];
        for (line_index, line) in text.split('\n').enumerate() {
            let mut offset = 0;
            for (i, ch) in line.chars().enumerate() {
                let value = ch.encode_utf8(&mut glyph);
                self.draw_pixel(column + i + offset, row + line_index, value, style);
                if is_full_width(ch) {
                    offset += 1;
                }
            }
        }
    }

    /// Render the frame and capture a new snapshot.
    ///
    /// Uses incremental mode when smart rendering is on and a snapshot
    /// exists, full mode otherwise. Returns the updated timing metrics.
    pub fn render(&mut self) -> io::Result<FrameTiming> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("render", smart = self.smart_render).entered();

        let start = Instant::now();
        let size = self.size.get();

        let mut out = mem::take(&mut self.scratch);
        out.clear();
        out.push_str(HIDE_CURSOR);
        let (mode, slots_written) = match (&self.snapshot, self.smart_render) {
            (Some(snapshot), true) => (
                RenderMode::Incremental,
                compose_changes(&mut out, &self.buffer, snapshot, size),
            ),
            _ => (RenderMode::Full, compose_full(&mut out, &self.buffer, size)),
        };
        self.writer.reset_counter();
        self.emit(&out)?;
        self.scratch = out;
        self.cursor_hidden = true;

        match &mut self.snapshot {
            Some(snapshot) => snapshot.copy_from(&self.buffer),
            None => self.snapshot = Some(self.buffer.snapshot()),
        }

        // Full-width glyphs cut at the buffer edge can survive the first
        // incremental frame; refill and force one more full frame, once.
        if mode == RenderMode::Incremental && !self.refreshed {
            self.refreshed = true;
            self.fill_buffer();
            self.snapshot = None;
            #[cfg(feature = "tracing")]
            tracing::debug!("post-incremental refresh scheduled");
        }

        let delta_time = start.elapsed();
        self.timing.record(start, delta_time);
        self.last_stats = RenderStats {
            mode,
            bytes_emitted: self.writer.bytes_written(),
            slots_written,
            duration: delta_time,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            ?mode,
            bytes = self.last_stats.bytes_emitted,
            slots = slots_written,
            "frame rendered"
        );

        Ok(self.timing)
    }

    /// Write the whole frame. Does not touch the snapshot.
    pub fn render_full(&mut self) -> io::Result<usize> {
        let size = self.size.get();
        let mut out = mem::take(&mut self.scratch);
        out.clear();
        let written = compose_full(&mut out, &self.buffer, size);
        self.emit(&out)?;
        self.scratch = out;
        Ok(written)
    }

    /// Write only the slots differing from the snapshot.
    ///
    /// Writes nothing without a snapshot of matching shape. Does not touch
    /// the snapshot.
    pub fn render_changes(&mut self) -> io::Result<usize> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(0);
        };
        let size = self.size.get();
        let mut out = mem::take(&mut self.scratch);
        out.clear();
        let written = compose_changes(&mut out, &self.buffer, snapshot, size);
        self.emit(&out)?;
        self.scratch = out;
        Ok(written)
    }

    /// Handle a terminal resize: refill, drop the snapshot, redraw fully.
    pub fn resize(&mut self) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("resize").entered();

        self.fill_buffer();
        self.snapshot = None;
        self.render_full()?;
        Ok(())
    }

    /// Make the cursor visible again.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.emit(SHOW_CURSOR)?;
        self.cursor_hidden = false;
        Ok(())
    }

    /// Hide the cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.emit(HIDE_CURSOR)?;
        self.cursor_hidden = true;
        Ok(())
    }

    fn emit(&mut self, out: &str) -> io::Result<()> {
        if out.is_empty() {
            return Ok(());
        }
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = self.show_cursor();
        }
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size)
            .field("filler", &self.filler)
            .field("shape", &self.buffer.shape())
            .field("has_snapshot", &self.snapshot.is_some())
            .field("smart_render", &self.smart_render)
            .field("refreshed", &self.refreshed)
            .finish_non_exhaustive()
    }
}

/// Whether `value` is a single full-width glyph once style codes are removed.
fn glyph_is_full_width(value: &str) -> bool {
    let plain = strip_style_codes(value);
    let mut chars = plain.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => is_full_width(ch),
        _ => false,
    }
}

/// Visible extent of `buffer` under `size`: rows, slots, and whether the
/// trailing slot's second half lies past the last column.
fn visible_extent(buffer: &FrameBuffer, size: Size) -> (usize, usize, bool) {
    let rows = buffer.rows().min(size.rows as usize);
    let slots = size.slots();
    let trailing_half_hidden = size.columns % 2 == 1;
    (rows, slots, trailing_half_hidden)
}

fn compose_full(out: &mut String, buffer: &FrameBuffer, size: Size) -> usize {
    let (rows, slots, trailing_half_hidden) = visible_extent(buffer, size);
    let mut written = 0;

    ansi::push_move_cursor(out, 1, 1);
    for (r, row) in buffer.iter_rows().take(rows).enumerate() {
        out.push('\r');
        let visible = row.len().min(slots);
        for (s, slot) in row[..visible].iter().enumerate() {
            slot.write_to(out, trailing_half_hidden && s + 1 == slots);
        }
        written += visible;
        if r + 1 < rows {
            out.push('\n');
        }
    }
    written
}

fn compose_changes(
    out: &mut String,
    buffer: &FrameBuffer,
    snapshot: &FrameBuffer,
    size: Size,
) -> usize {
    if snapshot.is_empty() {
        return 0;
    }
    let Some(diff) = SlotDiff::compute(snapshot, buffer) else {
        return 0;
    };
    let (rows, slots, trailing_half_hidden) = visible_extent(buffer, size);
    let mut written = 0;

    for (r, s) in diff.iter() {
        if r >= rows || s >= slots {
            continue;
        }
        let Some(slot) = buffer.get(r, s) else {
            continue;
        };
        ansi::push_move_cursor(out, r + 1, s * 2 + 1);
        slot.write_to(out, trailing_half_hidden && s + 1 == slots);
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use halfcell_style::{AnsiKeywords, Styler};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl SharedWriter {
        fn take(&self) -> String {
            let bytes = std::mem::take(&mut *self.0.lock().unwrap());
            String::from_utf8(bytes).unwrap()
        }
    }

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn canvas(rows: u16, columns: u16) -> (Canvas, SharedWriter) {
        let writer = SharedWriter::default();
        let canvas = Canvas::new(
            CanvasOptions::new(writer.clone()).with_size(SizeProvider::fixed(rows, columns)),
        );
        (canvas, writer)
    }

    fn half(canvas: &Canvas, row: usize, slot: usize, half: usize) -> String {
        canvas.buffer().get(row, slot).unwrap().half(half).to_string()
    }

    #[test]
    fn new_canvas_is_filled() {
        let (canvas, writer) = canvas(3, 6);
        assert_eq!(canvas.buffer().shape(), (3, 3));
        assert_eq!(half(&canvas, 2, 2, 1), " ");
        assert!(canvas.snapshot().is_none());
        assert_eq!(writer.take(), "");
    }

    #[test]
    fn full_width_at_even_column_blanks_sibling_half() {
        let (mut canvas, _) = canvas(1, 6);
        canvas.draw_pixel(2, 0, "日", None);
        assert_eq!(half(&canvas, 0, 1, 0), "日");
        assert_eq!(half(&canvas, 0, 1, 1), "");
    }

    #[test]
    fn full_width_at_odd_column_blanks_next_slot() {
        let (mut canvas, _) = canvas(1, 6);
        canvas.draw_pixel(3, 0, "日", None);
        assert_eq!(half(&canvas, 0, 1, 1), "日");
        assert_eq!(half(&canvas, 0, 2, 0), "");
        assert_eq!(half(&canvas, 0, 1, 0), " ");
    }

    #[test]
    fn full_width_at_last_odd_column_is_tolerated() {
        let (mut canvas, _) = canvas(1, 4);
        canvas.draw_pixel(3, 0, "日", None);
        assert_eq!(half(&canvas, 0, 1, 1), "日");
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let (mut canvas, _) = canvas(2, 4);
        let before = canvas.buffer().clone();
        canvas.draw_pixel(40, 0, "x", None);
        canvas.draw_pixel(0, 9, "x", None);
        assert_eq!(canvas.buffer(), &before);
    }

    #[test]
    fn styled_pixel_stores_wrapped_value() {
        let (mut canvas, _) = canvas(1, 2);
        let style = Styler::new().foreground("green").compile(&AnsiKeywords).unwrap();
        canvas.draw_pixel(1, 0, "x", Some(&style));
        assert_eq!(half(&canvas, 0, 0, 1), "\x1b[32mx\x1b[0m");
    }

    #[test]
    fn styled_full_width_pixel_still_blanks_companion() {
        let (mut canvas, _) = canvas(1, 4);
        let style = Styler::new().attribute("bold").compile(&AnsiKeywords).unwrap();
        canvas.draw_pixel(0, 0, "日", Some(&style));
        assert_eq!(half(&canvas, 0, 0, 1), "");
    }

    #[test]
    fn rectangle_covers_every_pixel() {
        let (mut canvas, _) = canvas(4, 8);
        canvas.draw_rectangle(Rect::new(1, 1, 3, 2), "#", None);
        assert_eq!(half(&canvas, 1, 0, 1), "#");
        assert_eq!(half(&canvas, 1, 1, 0), "#");
        assert_eq!(half(&canvas, 2, 1, 1), "#");
        assert_eq!(half(&canvas, 1, 0, 0), " ");
        assert_eq!(half(&canvas, 3, 1, 1), " ");
        assert_eq!(half(&canvas, 1, 2, 0), " ");
    }

    #[test]
    fn text_advances_extra_column_after_full_width() {
        let (mut canvas, _) = canvas(2, 8);
        canvas.draw_text(0, 0, "日a\nbc", None);
        assert_eq!(half(&canvas, 0, 0, 0), "日");
        assert_eq!(half(&canvas, 0, 0, 1), "");
        assert_eq!(half(&canvas, 0, 1, 0), "a");
        assert_eq!(half(&canvas, 1, 0, 0), "b");
        assert_eq!(half(&canvas, 1, 0, 1), "c");
    }

    #[test]
    fn first_render_is_full() {
        let (mut canvas, writer) = canvas(2, 4);
        canvas.draw_text(0, 0, "ab", None);
        canvas.render().unwrap();
        assert_eq!(writer.take(), "\x1b[?25l\x1b[1;1H\rab  \n\r    ");
        assert_eq!(canvas.last_stats().mode, RenderMode::Full);
        assert!(canvas.snapshot().is_some());
    }

    #[test]
    fn odd_columns_hide_trailing_half() {
        let (mut canvas, writer) = canvas(1, 3);
        canvas.draw_text(0, 0, "xyz", None);
        canvas.render().unwrap();
        assert_eq!(writer.take(), "\x1b[?25l\x1b[1;1H\rxyz");
    }

    #[test]
    fn unchanged_incremental_render_writes_only_cursor_hide() {
        let (mut canvas, writer) = canvas(3, 6);
        canvas.render().unwrap();
        writer.take();

        canvas.render().unwrap();
        assert_eq!(writer.take(), "\x1b[?25l");
        assert_eq!(canvas.last_stats().mode, RenderMode::Incremental);
        assert_eq!(canvas.last_stats().slots_written, 0);
    }

    #[test]
    fn single_change_emits_only_that_slot() {
        let (mut canvas, writer) = canvas(3, 6);
        canvas.render().unwrap();
        writer.take();

        canvas.draw_pixel(3, 2, "Q", None);
        canvas.render().unwrap();
        assert_eq!(writer.take(), "\x1b[?25l\x1b[3;3H Q");
        assert_eq!(canvas.last_frame_bytes(), "\x1b[?25l\x1b[3;3H Q".len() as u64);
    }

    #[test]
    fn first_incremental_render_triggers_one_refresh() {
        let (mut canvas, writer) = canvas(1, 4);
        canvas.render().unwrap();
        assert!(!canvas.is_refreshed());

        canvas.render().unwrap();
        assert!(canvas.is_refreshed());
        assert!(canvas.snapshot().is_none());
        writer.take();

        canvas.render().unwrap();
        assert_eq!(canvas.last_stats().mode, RenderMode::Full);
        canvas.render().unwrap();
        assert_eq!(canvas.last_stats().mode, RenderMode::Incremental);
        assert!(canvas.snapshot().is_some());
    }

    #[test]
    fn smart_render_off_always_renders_full() {
        let writer = SharedWriter::default();
        let mut canvas = Canvas::new(
            CanvasOptions::new(writer.clone())
                .with_size(SizeProvider::fixed(1, 2))
                .with_smart_render(false),
        );
        canvas.render().unwrap();
        canvas.render().unwrap();
        assert_eq!(canvas.last_stats().mode, RenderMode::Full);
        assert!(!canvas.is_refreshed());
    }

    #[test]
    fn resize_invalidates_snapshot_and_redraws() {
        let size = Arc::new(Mutex::new(Size::new(1, 2)));
        let probe = size.clone();
        let writer = SharedWriter::default();
        let mut canvas = Canvas::new(
            CanvasOptions::new(writer.clone())
                .with_size(SizeProvider::query(move || *probe.lock().unwrap())),
        );
        canvas.render().unwrap();
        writer.take();

        *size.lock().unwrap() = Size::new(2, 4);
        canvas.resize().unwrap();
        assert!(canvas.snapshot().is_none());
        assert_eq!(canvas.buffer().shape(), (2, 2));
        assert_eq!(writer.take(), "\x1b[1;1H\r    \n\r    ");

        canvas.render().unwrap();
        assert_eq!(canvas.last_stats().mode, RenderMode::Full);
    }

    #[test]
    fn render_changes_without_snapshot_writes_nothing() {
        let (mut canvas, writer) = canvas(2, 2);
        assert_eq!(canvas.render_changes().unwrap(), 0);
        assert_eq!(writer.take(), "");
    }

    #[test]
    fn drop_restores_cursor_after_render() {
        let (mut canvas, writer) = canvas(1, 2);
        canvas.render().unwrap();
        writer.take();
        drop(canvas);
        assert_eq!(writer.take(), "\x1b[?25h");
    }

    #[test]
    fn full_width_filler_blanks_second_half() {
        let writer = SharedWriter::default();
        let canvas = Canvas::new(
            CanvasOptions::new(writer)
                .with_size(SizeProvider::fixed(1, 4))
                .with_filler("\x1b[2m・\x1b[0m"),
        );
        assert_eq!(half(&canvas, 0, 1, 1), "");
    }
}
