//! Tokenized documents
//!
//! A [`Document`] owns its source text and the ordered spans covering it.
//! Tokens are materialized lazily as [`Token`] views borrowing both.

use std::iter::FusedIterator;

use super::segmenter::SpacePolicy;
use super::span::{Position, TokenSpan};
use crate::error::{Result, TokenizerError};

/// Source text plus the spans covering it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    spans: Vec<TokenSpan>,
    policy: SpacePolicy,
}

impl Document {
    pub(crate) fn new(text: String, spans: Vec<TokenSpan>, policy: SpacePolicy) -> Self {
        Self {
            text,
            spans,
            policy,
        }
    }

    /// The source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Spans in document order
    pub fn spans(&self) -> &[TokenSpan] {
        &self.spans
    }

    /// Space policy the spans were produced with
    pub fn space_policy(&self) -> SpacePolicy {
        self.policy
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Token at `index`
    pub fn get(&self, index: usize) -> Option<Token<'_>> {
        self.spans.get(index).map(|span| Token {
            doc: self,
            span,
            index,
        })
    }

    /// Iterate over tokens in document order
    pub fn iter(&self) -> Tokens<'_> {
        Tokens {
            doc: self,
            inner: self.spans.iter().enumerate(),
        }
    }

    /// Iterate over tokens that are not whitespace runs
    pub fn words(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.iter().filter(|token| !token.is_space())
    }

    /// Surface text of every token
    pub fn token_texts(&self) -> Vec<&str> {
        self.spans.iter().map(|span| span.text(&self.text)).collect()
    }

    /// Rebuild the text from the spans alone
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in self.iter() {
            out.push_str(token.text_with_ws());
        }
        out
    }

    /// Check that the spans cover the text exactly
    ///
    /// Spans must start at zero, follow each other without gaps or
    /// overlaps, agree with their byte ranges and flags, and end at the end
    /// of the text. Under [`SpacePolicy::Absorb`] a span with a trailing
    /// space leaves exactly one U+0020 before the next span.
    pub fn verify(&self) -> Result<()> {
        let text = self.text.as_str();
        let mut expected = Position::default();

        for (index, span) in self.spans.iter().enumerate() {
            let fail = |reason: String| TokenizerError::Reconstruction { index, reason };

            if span.start_position() != expected {
                return Err(fail(format!(
                    "starts at char {} (byte {}), expected char {} (byte {})",
                    span.start, span.byte_start, expected.char, expected.byte
                )));
            }
            if span.end < span.start {
                return Err(fail(format!(
                    "ends at char {} before it starts",
                    span.end
                )));
            }
            if span.byte_end > text.len()
                || span.byte_start >= span.byte_end
                || !text.is_char_boundary(span.byte_end)
            {
                return Err(fail(format!(
                    "byte range {:?} is not a slice of the text",
                    span.byte_range()
                )));
            }

            let piece = span.text(text);
            if piece.chars().count() != span.char_len() {
                return Err(fail(format!(
                    "covers {} chars but its byte range holds {}",
                    span.char_len(),
                    piece.chars().count()
                )));
            }
            if span.is_whitespace_run != piece.chars().all(char::is_whitespace)
                || (!span.is_whitespace_run && piece.chars().any(char::is_whitespace))
            {
                return Err(fail(format!("whitespace flag is wrong for '{piece}'")));
            }

            expected = span.end_position();
            let rest = &text[expected.byte..];

            match self.policy {
                SpacePolicy::Preserve => {
                    let followed = rest.chars().next().is_some_and(char::is_whitespace);
                    if span.trailing_space != followed {
                        return Err(fail(format!(
                            "trailing_space is {} but the next char is {}whitespace",
                            span.trailing_space,
                            if followed { "" } else { "not " }
                        )));
                    }
                }
                SpacePolicy::Absorb => {
                    if span.trailing_space {
                        if !rest.starts_with(' ') {
                            return Err(fail("trailing space absorbed but none follows".into()));
                        }
                        expected = Position::new(expected.byte + 1, expected.char + 1);
                    }
                }
            }
        }

        if expected.byte != text.len() {
            return Err(TokenizerError::Reconstruction {
                index: self.spans.len(),
                reason: format!(
                    "spans end at byte {}, text is {} bytes",
                    expected.byte,
                    text.len()
                ),
            });
        }

        let rebuilt = self.reconstruct();
        if rebuilt != text {
            let index = self
                .iter()
                .position(|token| !text[token.span.byte_start..].starts_with(token.text_with_ws()))
                .unwrap_or(self.spans.len());
            return Err(TokenizerError::Reconstruction {
                index,
                reason: "rebuilt text differs from the source".into(),
            });
        }
        Ok(())
    }

    /// Take the text and spans apart
    pub fn into_parts(self) -> (String, Vec<TokenSpan>) {
        (self.text, self.spans)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = Token<'a>;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view of one token
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    doc: &'a Document,
    span: &'a TokenSpan,
    index: usize,
}

impl<'a> Token<'a> {
    /// Surface text
    pub fn text(&self) -> &'a str {
        self.span.text(&self.doc.text)
    }

    /// Surface text followed by the space absorbed into this token, if any
    pub fn text_with_ws(&self) -> &'a str {
        if self.doc.policy == SpacePolicy::Absorb && self.span.trailing_space {
            &self.doc.text[self.span.byte_start..self.span.byte_end + 1]
        } else {
            self.text()
        }
    }

    /// Canonical text from a special case, falling back to the surface text
    pub fn norm(&self) -> &'a str {
        self.span.norm.as_deref().unwrap_or_else(|| self.text())
    }

    /// Whether this token is a whitespace run
    pub fn is_space(&self) -> bool {
        self.span.is_whitespace_run
    }

    /// Whether whitespace follows this token
    pub fn trailing_space(&self) -> bool {
        self.span.trailing_space
    }

    /// Underlying span
    pub fn span(&self) -> &'a TokenSpan {
        self.span
    }

    /// Position in the document
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Iterator over the tokens of a [`Document`]
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    doc: &'a Document,
    inner: std::iter::Enumerate<std::slice::Iter<'a, TokenSpan>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, span) = self.inner.next()?;
        Some(Token {
            doc: self.doc,
            span,
            index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Tokens<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (index, span) = self.inner.next_back()?;
        Some(Token {
            doc: self.doc,
            span,
            index,
        })
    }
}

impl ExactSizeIterator for Tokens<'_> {}
impl FusedIterator for Tokens<'_> {}
