//! Whitespace segmentation driver
//!
//! Walks the text once, alternating between whitespace runs and
//! whitespace-free runs. Whitespace-free runs go through the
//! [`SpanBuilder`] cascade; whitespace runs become tokens of their own
//! unless [`SpacePolicy::Absorb`] folds a single space into the preceding
//! token.

use serde::{Deserialize, Serialize};

use super::builder::SpanBuilder;
use super::span::{Position, TokenSpan};
use crate::error::Result;

/// How whitespace between tokens is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacePolicy {
    /// Every whitespace run becomes its own token
    #[default]
    Preserve,
    /// A single U+0020 after a token is recorded as that token's trailing
    /// space instead of becoming a token
    Absorb,
}

/// Splits a text into spans
pub struct Segmenter<'r> {
    builder: SpanBuilder<'r>,
    policy: SpacePolicy,
}

impl<'r> Segmenter<'r> {
    /// Create a segmenter using `builder` for whitespace-free runs
    pub fn new(builder: SpanBuilder<'r>, policy: SpacePolicy) -> Self {
        Self { builder, policy }
    }

    /// Produce the ordered spans covering `text`
    pub fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
        let mut spans = Vec::with_capacity(text.len() / 4 + 1);
        let Some(first) = text.chars().next() else {
            return Ok(spans);
        };

        let mut in_space = first.is_whitespace();
        let mut run_start = Position::default();
        let mut char_idx = 0;

        for (byte_idx, ch) in text.char_indices() {
            if ch.is_whitespace() != in_space {
                let here = Position::new(byte_idx, char_idx);
                run_start =
                    self.close_run(text, run_start, here, in_space, Some(ch), &mut spans)?;
                in_space = !in_space;
            }
            char_idx += 1;
        }

        let end = Position::new(text.len(), char_idx);
        self.close_run(text, run_start, end, in_space, None, &mut spans)?;
        Ok(spans)
    }

    /// Emit spans for the run `start..end` and return where the next run
    /// begins
    fn close_run(
        &self,
        text: &str,
        start: Position,
        end: Position,
        in_space: bool,
        next: Option<char>,
        spans: &mut Vec<TokenSpan>,
    ) -> Result<Position> {
        // Empty only when the previous token absorbed the whole space run
        if start.byte == end.byte {
            return Ok(end);
        }
        let run = &text[start.byte..end.byte];

        if in_space {
            spans.push(TokenSpan::whitespace(start, run));
            return Ok(end);
        }

        match self.policy {
            SpacePolicy::Preserve => {
                self.builder.build(run, start, next.is_some(), spans)?;
                Ok(end)
            }
            SpacePolicy::Absorb => {
                let absorb = next == Some(' ');
                self.builder.build(run, start, absorb, spans)?;
                if absorb {
                    Ok(Position::new(end.byte + 1, end.char + 1))
                } else {
                    Ok(end)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exceptions::{ExceptionTable, SpecialCase};
    use crate::domain::matcher::{FnAffixMatcher, NoAffixes};

    fn segment(text: &str, policy: SpacePolicy) -> Vec<TokenSpan> {
        let table = ExceptionTable::new();
        Segmenter::new(SpanBuilder::new(&NoAffixes, &table), policy)
            .segment(text)
            .unwrap()
    }

    fn texts<'a>(text: &'a str, spans: &[TokenSpan]) -> Vec<&'a str> {
        spans.iter().map(|s| s.text(text)).collect()
    }

    #[test]
    fn test_plain_sentence() {
        let text = "I love apples";
        let spans = segment(text, SpacePolicy::Preserve);
        assert_eq!(texts(text, &spans), vec!["I", " ", "love", " ", "apples"]);

        let bounds: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(bounds, vec![(0, 0), (1, 1), (2, 5), (6, 6), (7, 12)]);

        let flags: Vec<bool> = spans.iter().map(|s| s.trailing_space).collect();
        assert_eq!(flags, vec![true, false, true, false, false]);
        assert!(spans[1].is_whitespace_run);
        assert!(!spans[0].is_whitespace_run);
    }

    #[test]
    fn test_whitespace_runs_are_single_tokens() {
        let text = "I  love apples ";
        let spans = segment(text, SpacePolicy::Preserve);
        assert_eq!(
            texts(text, &spans),
            vec!["I", "  ", "love", " ", "apples", " "]
        );
        assert_eq!((spans[1].start, spans[1].end), (1, 2));
        assert_eq!((spans[5].start, spans[5].end), (14, 14));
        assert!(spans[4].trailing_space);
        assert!(!spans[5].trailing_space);
    }

    #[test]
    fn test_leading_whitespace() {
        let text = "  hello";
        let spans = segment(text, SpacePolicy::Preserve);
        assert_eq!(texts(text, &spans), vec!["  ", "hello"]);
        assert!(spans[0].is_whitespace_run);
        assert!(!spans[1].trailing_space);
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("", SpacePolicy::Preserve).is_empty());
        assert!(segment("", SpacePolicy::Absorb).is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let text = " \t\n ";
        let spans = segment(text, SpacePolicy::Preserve);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
        assert!(spans[0].is_whitespace_run);
    }

    #[test]
    fn test_mixed_whitespace_kinds() {
        let text = "a\u{00A0}b\u{3000}c";
        let spans = segment(text, SpacePolicy::Preserve);
        assert_eq!(texts(text, &spans), vec!["a", "\u{00A0}", "b", "\u{3000}", "c"]);
        assert_eq!(spans[3].byte_range(), 4..7);
        assert_eq!((spans[4].start, spans[4].end), (4, 4));
    }

    #[test]
    fn test_absorb_single_spaces() {
        let text = "I love apples";
        let spans = segment(text, SpacePolicy::Absorb);
        assert_eq!(texts(text, &spans), vec!["I", "love", "apples"]);
        let flags: Vec<bool> = spans.iter().map(|s| s.trailing_space).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_absorb_keeps_remaining_whitespace() {
        let text = "I  love\napples ";
        let spans = segment(text, SpacePolicy::Absorb);
        assert_eq!(texts(text, &spans), vec!["I", " ", "love", "\n", "apples"]);
        assert_eq!((spans[1].start, spans[1].end), (2, 2));
        assert!(spans[0].trailing_space);
        assert!(!spans[2].trailing_space);
        assert!(spans[4].trailing_space);
    }

    #[test]
    fn test_runs_go_through_cascade() {
        let table = ExceptionTable::from_entries([(
            "don't",
            vec![SpecialCase::new("do"), SpecialCase::new("n't")],
        )])
        .unwrap();
        let matcher = FnAffixMatcher::new().suffix(|s| s.ends_with('!').then_some(1));
        let text = "don't stop!";
        let spans = Segmenter::new(SpanBuilder::new(&matcher, &table), SpacePolicy::Preserve)
            .segment(text)
            .unwrap();
        assert_eq!(texts(text, &spans), vec!["do", "n't", " ", "stop", "!"]);
        assert!(!spans[0].trailing_space);
        assert!(spans[1].trailing_space);
        assert!(!spans[4].trailing_space);
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&SpacePolicy::Absorb).unwrap();
        assert_eq!(json, "\"absorb\"");
        let policy: SpacePolicy = serde_json::from_str("\"preserve\"").unwrap();
        assert_eq!(policy, SpacePolicy::Preserve);
    }
}
