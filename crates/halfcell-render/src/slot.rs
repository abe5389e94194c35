#![forbid(unsafe_code)]

//! Packed half-cell slots.
//!
//! Terminal columns are paired two at a time: column `c` lives in slot
//! `c / 2`, half `c % 2`. Each half holds its own already-styled string, so
//! two neighbouring columns can carry different styles. A full-width glyph
//! fills one half and leaves its companion column empty (`""`).

/// Two adjacent terminal columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellSlot {
    halves: [String; 2],
}

impl CellSlot {
    /// Slot with the given halves.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            halves: [first.into(), second.into()],
        }
    }

    /// Slot filled with `filler`; a full-width filler blanks the second half.
    pub fn filled(filler: &str, filler_is_full_width: bool) -> Self {
        let second = if filler_is_full_width { "" } else { filler };
        Self::new(filler, second)
    }

    /// Split a terminal column into `(slot, half)`.
    #[inline]
    pub const fn locate(column: usize) -> (usize, usize) {
        (column / 2, column % 2)
    }

    /// Read one half.
    ///
    /// # Panics
    ///
    /// Panics if `half > 1`.
    #[inline]
    pub fn half(&self, half: usize) -> &str {
        &self.halves[half]
    }

    /// Both halves.
    #[inline]
    pub fn halves(&self) -> &[String; 2] {
        &self.halves
    }

    /// Overwrite one half, reusing its allocation.
    ///
    /// # Panics
    ///
    /// Panics if `half > 1`.
    #[inline]
    pub fn set_half(&mut self, half: usize, value: &str) {
        let slot = &mut self.halves[half];
        slot.clear();
        slot.push_str(value);
    }

    /// Append the slot's content to `out`. With `first_only` the second half
    /// is skipped (it lies past the last column).
    #[inline]
    pub fn write_to(&self, out: &mut String, first_only: bool) {
        out.push_str(&self.halves[0]);
        if !first_only {
            out.push_str(&self.halves[1]);
        }
    }

    /// Both halves concatenated.
    pub fn joined(&self) -> String {
        let mut out = String::with_capacity(self.halves[0].len() + self.halves[1].len());
        self.write_to(&mut out, false);
        out
    }

    /// Copy another slot's content, reusing this slot's allocations.
    #[inline]
    pub fn copy_from(&mut self, other: &CellSlot) {
        self.halves[0].clone_from(&other.halves[0]);
        self.halves[1].clone_from(&other.halves[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_pairs_columns() {
        assert_eq!(CellSlot::locate(0), (0, 0));
        assert_eq!(CellSlot::locate(1), (0, 1));
        assert_eq!(CellSlot::locate(7), (3, 1));
    }

    #[test]
    fn filled_with_full_width_filler_blanks_second_half() {
        assert_eq!(CellSlot::filled("日", true), CellSlot::new("日", ""));
        assert_eq!(CellSlot::filled(".", false), CellSlot::new(".", "."));
    }

    #[test]
    fn set_half_and_join() {
        let mut slot = CellSlot::new("a", "b");
        slot.set_half(1, "\x1b[31mc\x1b[0m");
        assert_eq!(slot.half(0), "a");
        assert_eq!(slot.joined(), "a\x1b[31mc\x1b[0m");
    }

    #[test]
    fn write_to_can_skip_trailing_half() {
        let slot = CellSlot::new("a", "b");
        let mut out = String::new();
        slot.write_to(&mut out, true);
        assert_eq!(out, "a");
    }

    #[test]
    fn copy_from_is_independent() {
        let source = CellSlot::new("x", "y");
        let mut copy = CellSlot::default();
        copy.copy_from(&source);
        copy.set_half(0, "z");
        assert_eq!(source.half(0), "x");
        assert_eq!(copy.half(1), "y");
    }
}
