#![forbid(unsafe_code)]

//! Glyph width classification and style-code stripping.
//!
//! A full-width glyph occupies two terminal columns. Classification follows
//! the Unicode East Asian Width tables shipped with `unicode-width`.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

const ESC: char = '\x1b';

/// Check whether `ch` occupies two terminal columns.
#[inline]
pub fn is_full_width(ch: char) -> bool {
    if ch.is_ascii() {
        return false;
    }
    ch.width() == Some(2)
}

/// Check whether a one-character string is a full-width glyph.
///
/// # Panics
///
/// Panics unless `text` holds exactly one character.
pub fn is_full_width_str(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => is_full_width(ch),
        _ => panic!("width classification takes exactly one character, got {text:?}"),
    }
}

/// Display width of `text` in terminal columns.
///
/// Style codes are stripped first; every full-width character counts as two
/// columns and every other character as one.
pub fn text_width(text: &str) -> usize {
    strip_style_codes(text)
        .chars()
        .map(|ch| if is_full_width(ch) { 2 } else { 1 })
        .sum()
}

/// Remove SGR style sequences (`ESC [ <digits and ;> m`) from `text`.
///
/// Input without an escape byte is returned borrowed.
pub fn strip_style_codes(text: &str) -> Cow<'_, str> {
    if !text.contains(ESC) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(ESC) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match sgr_len(tail) {
            Some(len) => rest = &tail[len..],
            None => {
                out.push(ESC);
                rest = &tail[ESC.len_utf8()..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Length in bytes of the SGR sequence at the start of `text`, if any.
fn sgr_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[1] != b'[' {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate().skip(2) {
        match b {
            b'0'..=b'9' | b';' => {}
            b'm' if i > 2 => return Some(i + 1),
            _ => return None,
        }
    }
    None
}
