#![forbid(unsafe_code)]

//! Log macros for the core crate.
//!
//! With the `tracing` feature, [`debug!`](crate::debug) and
//! [`warn!`](crate::warn) are the `tracing` macros. Without it they expand to
//! nothing, so call sites need no `cfg` guards.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

#[cfg(test)]
mod tests {
    use crate::size::FALLBACK_SIZE;

    #[test]
    fn macros_accept_structured_fields() {
        crate::debug!(rows = FALLBACK_SIZE.rows, "size resolved");
        crate::warn!(error = %"query failed", fallback = ?FALLBACK_SIZE, "falling back");
        assert_eq!(FALLBACK_SIZE.columns, 80);
    }
}
