//! Error types for tokenization
//!
//! Tokenization is deterministic: the same input and configuration always
//! fail the same way, so none of these errors are retried internally.

use std::fmt;
use thiserror::Error;

/// Which matcher produced a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Prefix matcher
    Prefix,
    /// Suffix matcher
    Suffix,
    /// Infix matcher
    Infix,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherKind::Prefix => write!(f, "prefix"),
            MatcherKind::Suffix => write!(f, "suffix"),
            MatcherKind::Infix => write!(f, "infix"),
        }
    }
}

/// Errors surfaced by the tokenizer
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// The input text is missing or could not be resolved
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configured matcher failed or returned an impossible result
    #[error("pattern fault in {matcher} matcher: {reason}")]
    PatternFault {
        /// The matcher that failed
        matcher: MatcherKind,
        /// What went wrong
        reason: String,
    },

    /// Special-case sub-tokens do not cover their key exactly
    #[error(
        "special case '{key}' declares sub-tokens of {actual} chars, expected {expected}"
    )]
    ExceptionTableMismatch {
        /// The exception-table key
        key: String,
        /// Character length of the key
        expected: usize,
        /// Sum of the declared sub-token lengths
        actual: usize,
    },

    /// Rule configuration could not be parsed or is inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No rules are known for the requested language
    #[error("language '{0}' not supported")]
    UnsupportedLanguage(String),

    /// The span sequence does not reproduce the source text
    #[error("reconstruction failed at span {index}: {reason}")]
    Reconstruction {
        /// Index of the first offending span
        index: usize,
        /// Description of the violated invariant
        reason: String,
    },
}

impl TokenizerError {
    /// Shorthand for a [`TokenizerError::PatternFault`]
    pub fn pattern_fault(matcher: MatcherKind, reason: impl Into<String>) -> Self {
        TokenizerError::PatternFault {
            matcher,
            reason: reason.into(),
        }
    }
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;
