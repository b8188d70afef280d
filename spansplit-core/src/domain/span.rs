//! Token span records
//!
//! A [`TokenSpan`] identifies one token by position only. Character offsets
//! follow the inclusive `start..=end` convention; the byte range is kept
//! alongside so a span can be sliced out of the document without rescanning.

use std::ops::Range;
use std::sync::Arc;

/// Position of a character in the document, in both coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset
    pub byte: usize,
    /// Character offset
    pub char: usize,
}

impl Position {
    /// Create a position from a byte and character offset
    pub const fn new(byte: usize, char: usize) -> Self {
        Self { byte, char }
    }

    /// Position just after `text`, assuming `text` starts here
    #[inline]
    pub fn advance(self, text: &str) -> Self {
        Self {
            byte: self.byte + text.len(),
            char: self.char + text.chars().count(),
        }
    }
}

/// One token's location in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// Character offset of the first character (inclusive)
    pub start: usize,
    /// Character offset of the last character (inclusive)
    pub end: usize,
    /// Byte offset of the first character
    pub byte_start: usize,
    /// Byte offset one past the last character
    pub byte_end: usize,
    /// Whether whitespace immediately follows this token
    pub trailing_space: bool,
    /// Whether this token is a run of whitespace
    pub is_whitespace_run: bool,
    /// Canonical text supplied by a special case, if any
    pub norm: Option<Arc<str>>,
}

impl TokenSpan {
    /// Span covering `text`, which starts at `at` in the document
    ///
    /// `text` must be non-empty.
    pub fn covering(at: Position, text: &str) -> Self {
        debug_assert!(!text.is_empty(), "spans never cover empty text");
        let end = at.advance(text);
        Self {
            start: at.char,
            end: end.char - 1,
            byte_start: at.byte,
            byte_end: end.byte,
            trailing_space: false,
            is_whitespace_run: false,
            norm: None,
        }
    }

    /// Whitespace-run span covering `text`
    pub fn whitespace(at: Position, text: &str) -> Self {
        Self {
            is_whitespace_run: true,
            ..Self::covering(at, text)
        }
    }

    /// Attach a canonical form
    pub fn with_norm(mut self, norm: Option<Arc<str>>) -> Self {
        self.norm = norm;
        self
    }

    /// Number of characters covered
    #[inline]
    pub fn char_len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Byte range covered
    #[inline]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// The covered text within `source`
    ///
    /// # Panics
    ///
    /// Panics if `source` is not the text this span was produced from.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.byte_range()]
    }

    /// Position of the first character
    #[inline]
    pub fn start_position(&self) -> Position {
        Position::new(self.byte_start, self.start)
    }

    /// Position one past the last character
    #[inline]
    pub fn end_position(&self) -> Position {
        Position::new(self.byte_end, self.end + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_ascii() {
        let span = TokenSpan::covering(Position::new(4, 4), "love");
        assert_eq!(span.start, 4);
        assert_eq!(span.end, 7);
        assert_eq!(span.byte_range(), 4..8);
        assert_eq!(span.char_len(), 4);
        assert!(!span.trailing_space);
        assert!(!span.is_whitespace_run);
    }

    #[test]
    fn test_covering_multibyte() {
        // "café" is 4 chars but 5 bytes
        let span = TokenSpan::covering(Position::new(0, 0), "café");
        assert_eq!(span.end, 3);
        assert_eq!(span.byte_end, 5);
        assert_eq!(span.text("café au lait"), "café");
    }

    #[test]
    fn test_whitespace_span() {
        let span = TokenSpan::whitespace(Position::new(1, 1), "  ");
        assert!(span.is_whitespace_run);
        assert_eq!(span.end_position(), Position::new(3, 3));
    }

    #[test]
    fn test_position_advance() {
        let pos = Position::new(2, 2).advance("日本");
        assert_eq!(pos, Position::new(8, 4));
    }
}
