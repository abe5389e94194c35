#![forbid(unsafe_code)]

//! Diff computation between a frame buffer and its snapshot.
//!
//! # Algorithm
//!
//! Row-major scan:
//! 1. Iterate rows top to bottom
//! 2. Iterate slots left to right
//! 3. Compare old[row, slot] with new[row, slot] by content
//! 4. Record the position if different
//!
//! Shapes must match; a resize has to discard the snapshot before diffing
//! resumes, so [`SlotDiff::compute`] refuses mismatched buffers.
//!
//! # Usage
//!
//! ```
//! use halfcell_core::geometry::Size;
//! use halfcell_render::diff::SlotDiff;
//! use halfcell_render::frame_buffer::FrameBuffer;
//!
//! let old = FrameBuffer::with_size(Size::new(4, 8), " ", false);
//! let mut new = old.snapshot();
//! new.get_mut(2, 1).unwrap().set_half(0, "X");
//!
//! let diff = SlotDiff::compute(&old, &new).unwrap();
//! assert_eq!(diff.changes(), &[(2, 1)]);
//! ```

use crate::frame_buffer::FrameBuffer;

/// The diff between two frame buffers.
///
/// Contains the `(row, slot)` positions whose content differs, in row-major
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDiff {
    changes: Vec<(usize, usize)>,
}

impl SlotDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Compute the diff between `old` and `new`.
    ///
    /// Returns `None` when the shapes differ.
    pub fn compute(old: &FrameBuffer, new: &FrameBuffer) -> Option<Self> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("diff_compute", rows = new.rows()).entered();

        if old.rows() != new.rows() {
            return None;
        }
        let mut changes = Vec::new();
        for (r, (old_row, new_row)) in old.iter_rows().zip(new.iter_rows()).enumerate() {
            if old_row.len() != new_row.len() {
                return None;
            }
            for (s, (old_slot, new_slot)) in old_row.iter().zip(new_row).enumerate() {
                if old_slot != new_slot {
                    changes.push((r, s));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(changes = changes.len(), "diff computed");

        Some(Self { changes })
    }

    /// Number of changed slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if no slots changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed `(row, slot)` positions.
    #[inline]
    pub fn changes(&self) -> &[(usize, usize)] {
        &self.changes
    }

    /// Iterate over changed positions.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.changes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halfcell_core::geometry::Size;

    #[test]
    fn empty_diff_when_buffers_identical() {
        let a = FrameBuffer::with_size(Size::new(10, 10), " ", false);
        let b = a.snapshot();
        let diff = SlotDiff::compute(&a, &b).unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn scattered_changes_in_row_major_order() {
        let old = FrameBuffer::with_size(Size::new(10, 10), " ", false);
        let mut new = old.snapshot();
        new.get_mut(9, 4).unwrap().set_half(1, "B");
        new.get_mut(0, 0).unwrap().set_half(0, "A");
        new.get_mut(3, 2).unwrap().set_half(0, "C");

        let diff = SlotDiff::compute(&old, &new).unwrap();
        assert_eq!(diff.changes(), &[(0, 0), (3, 2), (9, 4)]);
    }

    #[test]
    fn mismatched_shapes_are_refused() {
        let old = FrameBuffer::with_size(Size::new(2, 4), " ", false);
        let taller = FrameBuffer::with_size(Size::new(3, 4), " ", false);
        let wider = FrameBuffer::with_size(Size::new(2, 6), " ", false);
        assert!(SlotDiff::compute(&old, &taller).is_none());
        assert!(SlotDiff::compute(&old, &wider).is_none());
    }

    #[test]
    fn writing_same_value_is_not_a_change() {
        let old = FrameBuffer::with_size(Size::new(1, 2), " ", false);
        let mut new = old.snapshot();
        new.get_mut(0, 0).unwrap().set_half(0, " ");
        assert!(SlotDiff::compute(&old, &new).unwrap().is_empty());
    }
}
