#![forbid(unsafe_code)]

//! Terminal size providers.
//!
//! A [`SizeProvider`] is either a fixed value or a query evaluated on every
//! call. Callers always go through [`SizeProvider::get`]; the result is never
//! cached across calls.

use std::fmt;

use crate::geometry::Size;

/// Size reported when the live terminal cannot be queried.
pub const FALLBACK_SIZE: Size = Size::new(24, 80);

/// Source of the canvas dimensions.
pub enum SizeProvider {
    /// A size that never changes.
    Fixed(Size),
    /// A query evaluated each time the size is needed.
    Query(Box<dyn Fn() -> Size + Send>),
}

impl SizeProvider {
    /// Fixed-size provider.
    pub const fn fixed(rows: u16, columns: u16) -> Self {
        Self::Fixed(Size::new(rows, columns))
    }

    /// Provider backed by an arbitrary query.
    pub fn query(f: impl Fn() -> Size + Send + 'static) -> Self {
        Self::Query(Box::new(f))
    }

    /// Provider that asks the controlling terminal for its size.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn terminal() -> Self {
        Self::query(terminal_size)
    }

    /// Resolve the current size.
    #[inline]
    pub fn get(&self) -> Size {
        match self {
            Self::Fixed(size) => *size,
            Self::Query(query) => query(),
        }
    }
}

impl Default for SizeProvider {
    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        Self::terminal()
    }

    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        Self::Fixed(FALLBACK_SIZE)
    }
}

impl From<Size> for SizeProvider {
    fn from(size: Size) -> Self {
        Self::Fixed(size)
    }
}

impl fmt::Debug for SizeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::Query(_) => f.write_str("Query(..)"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn terminal_size() -> Size {
    match crossterm::terminal::size() {
        Ok((columns, rows)) => Size::new(rows, columns),
        Err(_err) => {
            crate::warn!(error = %_err, fallback = ?FALLBACK_SIZE, "terminal size query failed");
            FALLBACK_SIZE
        }
    }
}
