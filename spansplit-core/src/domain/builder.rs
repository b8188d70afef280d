//! Affix, special-case and infix cascade for a single whitespace-free run
//!
//! The cascade is a loop with early exits rather than mutual recursion:
//!
//! 1. strip prefixes and suffixes until neither matches, the run is used
//!    up, or what is left is a special-case key
//! 2. expand a special case into its declared sub-tokens, or
//! 3. split the remainder on infixes, or keep it whole
//!
//! Spans come out in document order: prefixes, special-case sub-tokens or
//! the remaining core or infix pieces, then suffixes.

use std::ops::Range;

use smallvec::SmallVec;

use super::exceptions::{ExceptionTable, SpecialCase};
use super::matcher::AffixMatcher;
use super::span::{Position, TokenSpan};
use crate::error::{MatcherKind, Result, TokenizerError};

type SpanList = SmallVec<[TokenSpan; 4]>;

/// Builds the spans for one whitespace-free run
#[derive(Clone, Copy)]
pub struct SpanBuilder<'r> {
    matcher: &'r dyn AffixMatcher,
    exceptions: &'r ExceptionTable,
}

/// Result of the stripping and splitting stage, before assembly
#[derive(Debug, Default)]
struct RunSplit<'t> {
    prefixes: SpanList,
    special: SpanList,
    core: Option<(Position, &'t str)>,
    infixes: Vec<TokenSpan>,
    /// Discovered right to left
    suffixes: SpanList,
}

impl<'r> SpanBuilder<'r> {
    /// Create a builder over the given rules
    pub fn new(matcher: &'r dyn AffixMatcher, exceptions: &'r ExceptionTable) -> Self {
        Self {
            matcher,
            exceptions,
        }
    }

    /// Append the spans for `run`, which starts at `at`, to `out`
    ///
    /// `trailing_space` is the boundary condition of the whole run and ends
    /// up on its last span. `run` must be non-empty and free of whitespace.
    pub fn build(
        &self,
        run: &str,
        at: Position,
        trailing_space: bool,
        out: &mut Vec<TokenSpan>,
    ) -> Result<()> {
        debug_assert!(!run.is_empty());
        let split = self.split(run, at)?;
        let first_new = out.len();
        split.attach(out);

        if let Some(last) = out[first_new..].last_mut() {
            last.trailing_space = trailing_space;
        }
        Ok(())
    }

    fn split<'t>(&self, run: &'t str, at: Position) -> Result<RunSplit<'t>> {
        let mut split = RunSplit::default();
        let mut core = run;
        let mut at = at;

        loop {
            if core.is_empty() || self.exceptions.contains(core) {
                break;
            }
            let prefix = self.prefix_len(core)?;
            let mut suffix = self.suffix_len(core)?;
            if prefix.is_none() && suffix.is_none() {
                break;
            }

            if let Some(len) = prefix {
                let (head, rest) = core.split_at(len);
                split.prefixes.push(TokenSpan::covering(at, head));
                at = at.advance(head);
                core = rest;

                if core.is_empty() || self.exceptions.contains(core) {
                    break;
                }
                suffix = self.suffix_len(core)?;
            }

            if let Some(len) = suffix {
                let (rest, tail) = core.split_at(core.len() - len);
                split
                    .suffixes
                    .push(TokenSpan::covering(at.advance(rest), tail));
                core = rest;
            }
        }

        if core.is_empty() {
            return Ok(split);
        }

        if let Some(cases) = self.exceptions.get(core) {
            log::trace!("special case '{core}' -> {} sub-tokens", cases.len());
            split.special = special_case_spans(core, at, cases);
            return Ok(split);
        }

        let infixes = self.infix_spans(core)?;
        if infixes.is_empty() {
            split.core = Some((at, core));
        } else {
            log::trace!("'{core}' split on {} infixes", infixes.len());
            split.infixes = infix_token_spans(core, at, &infixes);
        }
        Ok(split)
    }

    /// Prefix length, with empty matches treated as no match
    fn prefix_len(&self, text: &str) -> Result<Option<usize>> {
        match self.matcher.prefix_len(text)? {
            None | Some(0) => Ok(None),
            Some(len) if len <= text.len() && text.is_char_boundary(len) => Ok(Some(len)),
            Some(len) => Err(TokenizerError::pattern_fault(
                MatcherKind::Prefix,
                format!("length {len} is not a character boundary of '{text}'"),
            )),
        }
    }

    /// Suffix length, with empty matches treated as no match
    fn suffix_len(&self, text: &str) -> Result<Option<usize>> {
        match self.matcher.suffix_len(text)? {
            None | Some(0) => Ok(None),
            Some(len) if len <= text.len() && text.is_char_boundary(text.len() - len) => {
                Ok(Some(len))
            }
            Some(len) => Err(TokenizerError::pattern_fault(
                MatcherKind::Suffix,
                format!("length {len} is not a character boundary of '{text}'"),
            )),
        }
    }

    /// Non-empty infix ranges, checked for order and bounds
    fn infix_spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        let mut spans = self.matcher.infix_spans(text)?;
        let mut last_end = 0;
        for span in &spans {
            let valid = span.start <= span.end
                && span.start >= last_end
                && span.end <= text.len()
                && text.is_char_boundary(span.start)
                && text.is_char_boundary(span.end);
            if !valid {
                return Err(TokenizerError::pattern_fault(
                    MatcherKind::Infix,
                    format!("span {span:?} is out of order or out of bounds in '{text}'"),
                ));
            }
            last_end = span.end;
        }
        spans.retain(|span| !span.is_empty());
        Ok(spans)
    }
}

impl RunSplit<'_> {
    fn attach(self, out: &mut Vec<TokenSpan>) {
        out.extend(self.prefixes);
        out.extend(self.special);
        if let Some((at, core)) = self.core {
            out.push(TokenSpan::covering(at, core));
        }
        out.extend(self.infixes);
        out.extend(self.suffixes.into_iter().rev());
    }
}

/// Lay out special-case sub-tokens over `text` using their declared lengths
fn special_case_spans(text: &str, at: Position, cases: &[SpecialCase]) -> SpanList {
    let mut spans = SpanList::with_capacity(cases.len());
    let mut rest = text;
    let mut pos = at;

    for case in cases {
        let byte_len = rest
            .char_indices()
            .nth(case.char_len())
            .map_or(rest.len(), |(i, _)| i);
        let (piece, tail) = rest.split_at(byte_len);
        spans.push(TokenSpan::covering(pos, piece).with_norm(case.norm.clone()));
        pos = pos.advance(piece);
        rest = tail;
    }
    spans
}

/// Interleave the gaps between infixes with the infixes themselves
fn infix_token_spans(text: &str, at: Position, infixes: &[Range<usize>]) -> Vec<TokenSpan> {
    let mut spans = Vec::with_capacity(infixes.len() * 2 + 1);
    let mut offset = 0;
    let mut pos = at;

    let mut push = |piece: &str, pos: &mut Position| {
        spans.push(TokenSpan::covering(*pos, piece));
        *pos = pos.advance(piece);
    };

    for infix in infixes {
        if infix.start > offset {
            push(&text[offset..infix.start], &mut pos);
        }
        push(&text[infix.clone()], &mut pos);
        offset = infix.end;
    }
    if offset < text.len() {
        push(&text[offset..], &mut pos);
    }
    spans
}
