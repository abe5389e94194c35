//! Property tests for style compilation.

use halfcell_style::{AnsiKeywords, StyleError, Styler, compile_value, style_text};
use proptest::prelude::*;

const BASE_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

proptest! {
    #[test]
    fn escape_codes_pass_through_any_field(code in 0u16..256, field in "[a-zA-Z]{1,12}") {
        let raw = format!("\x1b[38;5;{code}m");
        prop_assert_eq!(compile_value(&AnsiKeywords, &field, &raw).unwrap(), raw);
    }

    #[test]
    fn foreground_and_background_differ(index in 0usize..8) {
        let word = BASE_COLORS[index];
        let style = Styler::new()
            .foreground(word)
            .background(word)
            .compile(&AnsiKeywords)
            .unwrap();
        prop_assert_ne!(style.foreground, style.background);
    }

    #[test]
    fn applied_style_wraps_text(text in "[ -~]{0,20}", index in 0usize..8) {
        let style = Styler::new().foreground(BASE_COLORS[index]).compile(&AnsiKeywords).unwrap();
        let code = style.foreground.clone().unwrap();
        prop_assert_eq!(style.apply(&text), style_text(&text, &code));
        prop_assert!(style.apply(&text).ends_with("\x1b[0m"));
    }

    #[test]
    fn unknown_keywords_are_reported(word in "zz[a-z]{1,8}") {
        let err = Styler::new().foreground(word.clone()).compile(&AnsiKeywords).unwrap_err();
        prop_assert_eq!(err, StyleError::UnknownKeyword { field: "foreground".into(), keyword: word });
    }
}
