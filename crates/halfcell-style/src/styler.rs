//! Styler descriptors and their compiled form.
//!
//! A [`Styler`] names the foreground, background and attributes a piece of
//! text should carry. Each leaf is either a keyword resolved through a
//! [`KeywordTable`] or an escape code passed through untouched.
//!
//! ```
//! use halfcell_style::{AnsiKeywords, Styler};
//!
//! let style = Styler::new()
//!     .foreground("red")
//!     .background("white")
//!     .attribute("bold")
//!     .compile(&AnsiKeywords)
//!     .unwrap();
//! assert_eq!(style.apply("hi"), "\x1b[31m\x1b[47m\x1b[1mhi\x1b[0m");
//! ```

use halfcell_core::geometry::capitalize;

use crate::error::StyleError;
use crate::keyword::KeywordTable;

/// Universal reset suffix appended after styled text.
pub const STYLE_RESET: &str = "\x1b[0m";

const ESC: char = '\x1b';

/// Wrap `text` in `code` and the reset suffix.
///
/// `("Hi", "\x1b[32m")` becomes `"\x1b[32mHi\x1b[0m"`.
pub fn style_text(text: &str, code: &str) -> String {
    let mut out = String::with_capacity(code.len() + text.len() + STYLE_RESET.len());
    out.push_str(code);
    out.push_str(text);
    out.push_str(STYLE_RESET);
    out
}

/// Compile one leaf value found under `field`.
///
/// Values holding an escape byte are already codes. Anything else is a
/// keyword; under a background field it is prefixed with `bg` unless it
/// already says so.
pub fn compile_value<K: KeywordTable + ?Sized>(
    table: &K,
    field: &str,
    value: &str,
) -> Result<String, StyleError> {
    if value.contains(ESC) {
        return Ok(value.to_string());
    }

    let keyword = if field.contains("background") && !value.contains("bg") {
        format!("bg{}", capitalize(value))
    } else {
        value.to_string()
    };

    match table.resolve(&keyword) {
        Some(code) => Ok(code.into_owned()),
        None => Err(StyleError::UnknownKeyword {
            field: field.to_string(),
            keyword,
        }),
    }
}

/// Uncompiled style intent for a run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styler {
    /// Foreground keyword or code.
    pub foreground: Option<String>,
    /// Background keyword or code.
    pub background: Option<String>,
    /// Attribute keywords or codes, applied in order.
    pub attributes: Vec<String>,
}

impl Styler {
    /// Empty styler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground.
    #[must_use]
    pub fn foreground(mut self, value: impl Into<String>) -> Self {
        self.foreground = Some(value.into());
        self
    }

    /// Set the background.
    #[must_use]
    pub fn background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn attribute(mut self, value: impl Into<String>) -> Self {
        self.attributes.push(value.into());
        self
    }

    /// Resolve every leaf through `table`.
    ///
    /// Fails on the first unresolvable leaf; nothing is returned partially.
    pub fn compile<K: KeywordTable + ?Sized>(&self, table: &K) -> Result<CompiledStyle, StyleError> {
        let foreground = self
            .foreground
            .as_deref()
            .map(|v| compile_value(table, "foreground", v))
            .transpose()?;
        let background = self
            .background
            .as_deref()
            .map(|v| compile_value(table, "background", v))
            .transpose()?;
        let attributes = self
            .attributes
            .iter()
            .map(|v| compile_value(table, "attributes", v))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledStyle {
            foreground,
            background,
            attributes,
        })
    }
}

/// A styler whose leaves are all escape codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompiledStyle {
    /// Foreground code.
    pub foreground: Option<String>,
    /// Background code.
    pub background: Option<String>,
    /// Attribute codes.
    pub attributes: Vec<String>,
}

impl CompiledStyle {
    /// Style with no codes at all.
    pub const fn empty() -> Self {
        Self {
            foreground: None,
            background: None,
            attributes: Vec::new(),
        }
    }

    /// Whether applying this style adds nothing but the reset suffix.
    pub fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.attributes.is_empty()
    }

    /// Concatenated prefix: foreground, background, then attributes.
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        if let Some(fg) = &self.foreground {
            prefix.push_str(fg);
        }
        if let Some(bg) = &self.background {
            prefix.push_str(bg);
        }
        for attribute in &self.attributes {
            prefix.push_str(attribute);
        }
        prefix
    }

    /// Style `text`: prefix, text, reset suffix.
    pub fn apply(&self, text: &str) -> String {
        style_text(text, &self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::AnsiKeywords;

    #[test]
    fn style_text_wraps_with_reset() {
        assert_eq!(style_text("Hi", "\x1b[32m"), "\x1b[32mHi\x1b[0m");
    }

    #[test]
    fn background_keyword_gets_prefixed() {
        let fg = compile_value(&AnsiKeywords, "foreground", "red").unwrap();
        let bg = compile_value(&AnsiKeywords, "background", "red").unwrap();
        assert_eq!(fg, "\x1b[31m");
        assert_eq!(bg, "\x1b[41m");
        assert_ne!(fg, bg);
    }

    #[test]
    fn explicit_background_keyword_is_not_prefixed_twice() {
        let bg = compile_value(&AnsiKeywords, "background", "bgBrightRed").unwrap();
        assert_eq!(bg, "\x1b[101m");
    }

    #[test]
    fn raw_codes_pass_through() {
        let code = compile_value(&AnsiKeywords, "background", "\x1b[48;5;17m").unwrap();
        assert_eq!(code, "\x1b[48;5;17m");
    }

    #[test]
    fn unknown_keyword_names_field() {
        let err = Styler::new()
            .foreground("red")
            .attribute("sparkle")
            .compile(&AnsiKeywords)
            .unwrap_err();
        assert_eq!(
            err,
            StyleError::UnknownKeyword {
                field: "attributes".into(),
                keyword: "sparkle".into()
            }
        );
        assert_eq!(err.field(), "attributes");
    }

    #[test]
    fn apply_orders_foreground_background_attributes() {
        let style = Styler::new()
            .attribute("underline")
            .background("blue")
            .foreground("yellow")
            .compile(&AnsiKeywords)
            .unwrap();
        assert_eq!(style.prefix(), "\x1b[33m\x1b[44m\x1b[4m");
        assert_eq!(style.apply("x"), "\x1b[33m\x1b[44m\x1b[4mx\x1b[0m");
    }

    #[test]
    fn empty_style_only_resets() {
        let style = CompiledStyle::empty();
        assert!(style.is_empty());
        assert_eq!(style.apply("x"), "x\x1b[0m");
    }
}
