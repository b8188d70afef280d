//! Pluggable affix matchers
//!
//! The cascade never inspects rule tables directly. It asks an
//! [`AffixMatcher`] three questions about a piece of text: how long a prefix
//! it starts with, how long a suffix it ends with, and where its infixes
//! are. All lengths and ranges are in bytes relative to the text passed in.

use std::fmt;
use std::ops::Range;

use crate::error::Result;

/// Prefix, suffix and infix matching for one language
///
/// Implementations must be pure: the same text always yields the same
/// answer. A match of length zero is treated as no match by the cascade.
pub trait AffixMatcher: Send + Sync {
    /// Length in bytes of the prefix `text` starts with, if any
    fn prefix_len(&self, text: &str) -> Result<Option<usize>>;

    /// Length in bytes of the suffix `text` ends with, if any
    fn suffix_len(&self, text: &str) -> Result<Option<usize>>;

    /// Byte ranges of infixes inside `text`, ordered and non-overlapping
    fn infix_spans(&self, text: &str) -> Result<Vec<Range<usize>>>;
}

/// Matcher that never matches anything
///
/// With it the tokenizer only splits on whitespace and special cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAffixes;

impl AffixMatcher for NoAffixes {
    fn prefix_len(&self, _text: &str) -> Result<Option<usize>> {
        Ok(None)
    }

    fn suffix_len(&self, _text: &str) -> Result<Option<usize>> {
        Ok(None)
    }

    fn infix_spans(&self, _text: &str) -> Result<Vec<Range<usize>>> {
        Ok(Vec::new())
    }
}

type LenFn = Box<dyn Fn(&str) -> Option<usize> + Send + Sync>;
type SpansFn = Box<dyn Fn(&str) -> Vec<Range<usize>> + Send + Sync>;

/// Adapter building an [`AffixMatcher`] from plain closures
///
/// Any matcher left unset never matches.
///
/// ```rust
/// use spansplit_core::FnAffixMatcher;
///
/// let matcher = FnAffixMatcher::new()
///     .prefix(|s| s.starts_with('(').then_some(1))
///     .suffix(|s| s.ends_with(')').then_some(1));
/// ```
#[derive(Default)]
pub struct FnAffixMatcher {
    prefix: Option<LenFn>,
    suffix: Option<LenFn>,
    infix: Option<SpansFn>,
}

impl fmt::Debug for FnAffixMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAffixMatcher")
            .field("prefix", &self.prefix.is_some())
            .field("suffix", &self.suffix.is_some())
            .field("infix", &self.infix.is_some())
            .finish()
    }
}

impl FnAffixMatcher {
    /// Create an adapter with no matchers set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix matcher
    pub fn prefix<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<usize> + Send + Sync + 'static,
    {
        self.prefix = Some(Box::new(f));
        self
    }

    /// Set the suffix matcher
    pub fn suffix<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<usize> + Send + Sync + 'static,
    {
        self.suffix = Some(Box::new(f));
        self
    }

    /// Set the infix matcher
    pub fn infix<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Vec<Range<usize>> + Send + Sync + 'static,
    {
        self.infix = Some(Box::new(f));
        self
    }
}

impl AffixMatcher for FnAffixMatcher {
    fn prefix_len(&self, text: &str) -> Result<Option<usize>> {
        Ok(self.prefix.as_ref().and_then(|f| f(text)))
    }

    fn suffix_len(&self, text: &str) -> Result<Option<usize>> {
        Ok(self.suffix.as_ref().and_then(|f| f(text)))
    }

    fn infix_spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        Ok(self.infix.as_ref().map(|f| f(text)).unwrap_or_default())
    }
}
