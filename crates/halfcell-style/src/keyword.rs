//! Keyword tables: symbolic style names to escape codes.

use std::borrow::Cow;
use std::collections::HashMap;

/// Resolves a symbolic style keyword to a concrete escape code.
pub trait KeywordTable {
    /// Look up `keyword`. Returns `None` for keywords the table does not know.
    fn resolve(&self, keyword: &str) -> Option<Cow<'static, str>>;
}

impl<T: KeywordTable + ?Sized> KeywordTable for &T {
    fn resolve(&self, keyword: &str) -> Option<Cow<'static, str>> {
        (**self).resolve(keyword)
    }
}

impl KeywordTable for HashMap<String, String> {
    fn resolve(&self, keyword: &str) -> Option<Cow<'static, str>> {
        self.get(keyword).cloned().map(Cow::Owned)
    }
}

/// The 16-colour ANSI palette plus the standard SGR attributes.
///
/// | Keyword | Code |
/// |---------|------|
/// | `black` .. `white` | `ESC[30m` .. `ESC[37m` |
/// | `brightBlack` .. `brightWhite` | `ESC[90m` .. `ESC[97m` |
/// | `bgBlack` .. `bgWhite` | `ESC[40m` .. `ESC[47m` |
/// | `bgBrightBlack` .. `bgBrightWhite` | `ESC[100m` .. `ESC[107m` |
/// | `reset`, `bold`, `dim`, `italic`, `underline`, `blink`, `inverse`, `hidden`, `strikethrough` | `ESC[0m` .. `ESC[9m` |
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiKeywords;

const COLORS: [&str; 8] = [
    "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "White",
];

impl AnsiKeywords {
    fn color_index(name: &str) -> Option<u8> {
        COLORS
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| i as u8)
    }

    fn color_code(keyword: &str) -> Option<u8> {
        let (background, rest) = match keyword.strip_prefix("bg") {
            Some(rest) => (true, rest),
            None => (false, keyword),
        };
        let (bright, name) = match rest
            .strip_prefix("Bright")
            .or_else(|| rest.strip_prefix("bright"))
        {
            Some(name) => (true, name),
            None => (false, rest),
        };
        // "bgred" is not a keyword: background names are camel-cased.
        if background && !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        if !background && rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        if bright && !name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        let index = Self::color_index(name)?;
        let base = match (background, bright) {
            (false, false) => 30,
            (false, true) => 90,
            (true, false) => 40,
            (true, true) => 100,
        };
        Some(base + index)
    }

    fn attribute_code(keyword: &str) -> Option<u8> {
        Some(match keyword {
            "reset" => 0,
            "bold" => 1,
            "dim" => 2,
            "italic" => 3,
            "underline" => 4,
            "blink" => 5,
            "inverse" => 7,
            "hidden" => 8,
            "strikethrough" => 9,
            _ => return None,
        })
    }
}

impl KeywordTable for AnsiKeywords {
    fn resolve(&self, keyword: &str) -> Option<Cow<'static, str>> {
        let code = Self::attribute_code(keyword).or_else(|| Self::color_code(keyword))?;
        Some(Cow::Owned(format!("\x1b[{code}m")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(keyword: &str) -> Option<String> {
        AnsiKeywords.resolve(keyword).map(Cow::into_owned)
    }

    #[test]
    fn foreground_colors() {
        assert_eq!(code("black").as_deref(), Some("\x1b[30m"));
        assert_eq!(code("red").as_deref(), Some("\x1b[31m"));
        assert_eq!(code("white").as_deref(), Some("\x1b[37m"));
        assert_eq!(code("brightRed").as_deref(), Some("\x1b[91m"));
    }

    #[test]
    fn background_colors() {
        assert_eq!(code("bgRed").as_deref(), Some("\x1b[41m"));
        assert_eq!(code("bgBrightBlue").as_deref(), Some("\x1b[104m"));
    }

    #[test]
    fn attributes() {
        assert_eq!(code("bold").as_deref(), Some("\x1b[1m"));
        assert_eq!(code("inverse").as_deref(), Some("\x1b[7m"));
        assert_eq!(code("strikethrough").as_deref(), Some("\x1b[9m"));
    }

    #[test]
    fn unknown_keywords() {
        assert_eq!(code("purple"), None);
        assert_eq!(code("bgred"), None);
        assert_eq!(code("Red"), None);
        assert_eq!(code("brightred"), None);
        assert_eq!(code(""), None);
    }

    #[test]
    fn map_table() {
        let mut table = HashMap::new();
        table.insert("accent".to_string(), "\x1b[38;5;208m".to_string());
        assert_eq!(
            table.resolve("accent").as_deref(),
            Some("\x1b[38;5;208m")
        );
        assert_eq!(table.resolve("missing"), None);
    }
}
