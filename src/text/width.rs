//! Display width of terminal text
//!
//! Lines handed to the layout engine mix plain glyphs with SGR color codes
//! and, in native image mode, multi-kilobyte Kitty graphics chunks. Neither
//! kind of escape occupies a column, so they are lexed out before widths are
//! summed. A small state machine handles this instead of a regex so that a
//! chunked `ESC _ G ... ESC \` run is consumed deterministically, including
//! payloads that contain `[` or `\` bytes.

use unicode_width::UnicodeWidthChar;

use super::ansi::ESC;

const BEL: char = '\x07';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Outside any escape sequence
    Text,
    /// Just consumed ESC
    Escape,
    /// Inside `ESC [` waiting for a final byte
    Csi,
    /// Inside a string sequence (APC, OSC, DCS) waiting for ST
    Str,
    /// Consumed ESC inside a string sequence
    StrEscape,
}

/// Iterator over the characters of `text` that are not part of an escape
/// sequence.
#[derive(Debug, Clone)]
pub struct VisibleChars<'a> {
    chars: std::str::Chars<'a>,
    state: LexState,
}

impl<'a> VisibleChars<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            state: LexState::Text,
        }
    }
}

impl Iterator for VisibleChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        for ch in self.chars.by_ref() {
            self.state = match (self.state, ch) {
                (LexState::Text, ESC) => LexState::Escape,
                (LexState::Text, _) => return Some(ch),

                (LexState::Escape, '[') => LexState::Csi,
                // APC (Kitty graphics), OSC, DCS
                (LexState::Escape, '_' | ']' | 'P') => LexState::Str,
                (LexState::Escape, ESC) => LexState::Escape,
                // Any other two-character escape
                (LexState::Escape, _) => LexState::Text,

                (LexState::Csi, '\x40'..='\x7E') => LexState::Text,
                (LexState::Csi, _) => LexState::Csi,

                (LexState::Str, ESC) => LexState::StrEscape,
                (LexState::Str, BEL) => LexState::Text,
                (LexState::Str, _) => LexState::Str,

                (LexState::StrEscape, '\\') => LexState::Text,
                (LexState::StrEscape, ESC) => LexState::StrEscape,
                (LexState::StrEscape, _) => LexState::Str,
            };
        }
        None
    }
}

/// Remove every escape sequence from `text`
pub fn strip_escapes(text: &str) -> String {
    VisibleChars::new(text).collect()
}

/// Column width of a single visible character
///
/// Wide and fullwidth glyphs take two columns, combining marks and format
/// characters none. Everything else, control characters included, takes one.
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}

/// Number of terminal columns `text` occupies once printed
pub fn visible_width(text: &str) -> usize {
    VisibleChars::new(text).map(char_width).sum()
}

/// Shorten plain text so it fits in `max` columns
///
/// Truncated text ends with `...`; a wide glyph that would straddle the limit
/// is dropped rather than split.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if visible_width(text) <= max {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let (budget, suffix) = if max >= ELLIPSIS.len() {
        (max - ELLIPSIS.len(), ELLIPSIS)
    } else {
        (max, "")
    };

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for ch in VisibleChars::new(text) {
        let w = char_width(ch);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(suffix);
    out
}
