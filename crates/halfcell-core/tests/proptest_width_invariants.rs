//! Property-based invariant tests for width and clamping helpers.
//!
//! 1. `text_width` is at least the character count and at most twice it.
//! 2. Stripping style codes never changes the measured width.
//! 3. Stripping styled plain text recovers the text.
//! 4. `clamp_and_round` always lands inside the range on an integer.

use halfcell_core::geometry::clamp_and_round;
use halfcell_core::width::{strip_style_codes, text_width};
use proptest::prelude::*;

fn styled(text: &str, code: u8) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

proptest! {
    #[test]
    fn width_bounded_by_char_count(text in "\\PC{0,32}") {
        let chars = text.chars().count();
        let width = text_width(&text);
        prop_assert!(width >= chars);
        prop_assert!(width <= chars * 2);
    }

    #[test]
    fn styling_does_not_change_width(text in "[a-z日本語한 ]{0,16}", code in 0u8..108) {
        prop_assert_eq!(text_width(&styled(&text, code)), text_width(&text));
    }

    #[test]
    fn strip_recovers_plain_text(text in "[a-zA-Z0-9 日本]{0,24}", code in 0u8..108) {
        prop_assert_eq!(strip_style_codes(&styled(&text, code)).into_owned(), text);
    }

    #[test]
    fn clamp_and_round_stays_in_range(value in -1.0e6f64..1.0e6, min in -100.0f64..0.0, max in 0.0f64..100.0) {
        let out = clamp_and_round(value, min.round(), max.round());
        prop_assert!(out >= min.round() && out <= max.round());
        prop_assert_eq!(out, out.round());
    }
}
