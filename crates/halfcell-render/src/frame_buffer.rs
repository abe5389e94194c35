#![forbid(unsafe_code)]

//! Frame buffer grid storage.
//!
//! A [`FrameBuffer`] is a `rows × ⌈columns / 2⌉` matrix of [`CellSlot`]s.
//!
//! # Invariants
//!
//! 1. After [`conform`](FrameBuffer::conform), every row holds exactly
//!    `size.slots()` slots and there are exactly `size.rows` rows.
//! 2. Conforming never touches a slot that already exists inside the new
//!    size; only newly exposed slots receive the filler.
//! 3. [`copy_from`](FrameBuffer::copy_from) produces an independent copy of
//!    identical shape and content.

use halfcell_core::geometry::Size;

use crate::slot::CellSlot;

/// Rows of packed half-cell slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: Vec<Vec<CellSlot>>,
}

impl FrameBuffer {
    /// Empty buffer with no rows.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Buffer of `size` with every slot filled.
    pub fn with_size(size: Size, filler: &str, filler_is_full_width: bool) -> Self {
        let mut buffer = Self::new();
        buffer.conform(size, filler, filler_is_full_width);
        buffer
    }

    /// Reshape to `size`, filling only slots that do not exist yet.
    ///
    /// Rows and slots beyond `size` are dropped so the shape always matches
    /// the last observed terminal size. Returns the number of slots filled.
    pub fn conform(&mut self, size: Size, filler: &str, filler_is_full_width: bool) -> usize {
        let rows = size.rows as usize;
        let slots = size.slots();

        self.rows.truncate(rows);
        let mut filled = 0;
        for r in 0..rows {
            if r == self.rows.len() {
                self.rows.push(Vec::with_capacity(slots));
            }
            let row = &mut self.rows[r];
            row.truncate(slots);
            while row.len() < slots {
                row.push(CellSlot::filled(filler, filler_is_full_width));
                filled += 1;
            }
        }
        filled
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Slots in the first row (all rows match after [`conform`](Self::conform)).
    #[inline]
    pub fn slots_per_row(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// `(rows, slots per row)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.slots_per_row())
    }

    /// Whether the buffer has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Slot at `(row, slot)`, if it exists.
    #[inline]
    pub fn get(&self, row: usize, slot: usize) -> Option<&CellSlot> {
        self.rows.get(row)?.get(slot)
    }

    /// Mutable slot at `(row, slot)`, if it exists.
    #[inline]
    pub fn get_mut(&mut self, row: usize, slot: usize) -> Option<&mut CellSlot> {
        self.rows.get_mut(row)?.get_mut(slot)
    }

    /// All slots of one row.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&[CellSlot]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellSlot]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Structural copy of `other` into `self`, reusing existing allocations.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.rows.truncate(other.rows.len());
        for (r, source) in other.rows.iter().enumerate() {
            if r == self.rows.len() {
                self.rows.push(Vec::with_capacity(source.len()));
            }
            let row = &mut self.rows[r];
            row.truncate(source.len());
            for (s, slot) in source.iter().enumerate() {
                if s == row.len() {
                    row.push(slot.clone());
                } else {
                    row[s].copy_from(slot);
                }
            }
        }
    }

    /// Independent structural copy.
    pub fn snapshot(&self) -> FrameBuffer {
        let mut copy = FrameBuffer::new();
        copy.copy_from(self);
        copy
    }
}
