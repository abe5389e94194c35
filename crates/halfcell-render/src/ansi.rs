#![forbid(unsafe_code)]

//! ANSI escape sequences emitted by the canvas.
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `ESC [ ? 25 l` | Hide cursor |
//! | `ESC [ ? 25 h` | Show cursor |
//! | `ESC [ row ; col H` | Cursor position (1-indexed) |
//! | `ESC [ 0 m` | Reset style |

use std::fmt::Write as _;

/// Hide the terminal cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Show the terminal cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// SGR reset: `CSI 0 m`.
pub const SGR_RESET: &str = halfcell_style::STYLE_RESET;

/// Escape sequence moving the cursor to the 1-indexed `(row, column)`.
pub fn move_cursor(row: usize, column: usize) -> String {
    let mut out = String::with_capacity(12);
    push_move_cursor(&mut out, row, column);
    out
}

/// Append the cursor move for the 1-indexed `(row, column)` to `out`.
#[inline]
pub fn push_move_cursor(out: &mut String, row: usize, column: usize) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\x1b[{row};{column}H");
}
