#![forbid(unsafe_code)]

//! Geometric primitives and numeric helpers.

/// Terminal dimensions as reported by a size provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    /// Number of terminal rows.
    pub rows: u16,
    /// Number of terminal columns.
    pub columns: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// Number of two-column slots needed to cover every column.
    ///
    /// Odd column counts round up; the trailing slot's second half is off screen.
    #[inline]
    pub const fn slots(&self) -> usize {
        (self.columns as usize).div_ceil(2)
    }

    /// Check if the size covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Rectangle anchored at the origin covering the whole size.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.columns, self.rows)
    }
}

/// A rectangle in terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Round `value` to the nearest integer, then clamp it into `[min, max]`.
///
/// ```
/// use halfcell_core::geometry::clamp_and_round;
///
/// assert_eq!(clamp_and_round(4.6, 0.0, 10.0), 5.0);
/// assert_eq!(clamp_and_round(-1.0, 0.0, 10.0), 0.0);
/// ```
#[inline]
pub fn clamp_and_round(value: f64, min: f64, max: f64) -> f64 {
    clamp(value.round(), min, max)
}

/// Upper-case the first character of `text`.
///
/// `"sesquipedalian"` becomes `"Sesquipedalian"`. Empty input stays empty.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Size, capitalize, clamp, clamp_and_round};

    #[test]
    fn clamp_and_round_rounds_before_clamping() {
        assert_eq!(clamp_and_round(4.6, 0.0, 10.0), 5.0);
        assert_eq!(clamp_and_round(4.4, 0.0, 10.0), 4.0);
    }

    #[test]
    fn clamp_limits_both_edges() {
        assert_eq!(clamp(-1, 0, 10), 0);
        assert_eq!(clamp(15, 0, 10), 10);
        assert_eq!(clamp(7, 0, 10), 7);
    }

    #[test]
    fn size_slots_round_up() {
        assert_eq!(Size::new(1, 80).slots(), 40);
        assert_eq!(Size::new(1, 81).slots(), 41);
        assert_eq!(Size::new(1, 0).slots(), 0);
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("sesquipedalian"), "Sesquipedalian");
        assert_eq!(capitalize("brightRed"), "BrightRed");
        assert_eq!(capitalize(""), "");
    }
}
