//! Lossless rule-based tokenization
//!
//! This crate splits raw text into tokens using a spaCy-style rule cascade:
//! whitespace runs first, then prefixes and suffixes are peeled off each
//! whitespace-free run, special cases are expanded from a lookup table and
//! infixes split what remains. Every token records its character and byte
//! offsets, so the original text can always be rebuilt exactly from the
//! token sequence.
//!
//! # Architecture
//!
//! - **Domain layer**: spans, the affix cascade, the whitespace driver and
//!   documents, all independent of where rules come from
//! - **Language layer**: TOML rule sets compiled into regex matchers, with
//!   English embedded
//! - **API layer**: the [`Tokenizer`] entry point and its builder
//!
//! # Example
//!
//! ```rust
//! use spansplit_core::Tokenizer;
//!
//! let tokenizer = Tokenizer::for_language("en").unwrap();
//! let doc = tokenizer.tokenize("I don't like (green) eggs.").unwrap();
//!
//! let words: Vec<&str> = doc.words().map(|t| t.text()).collect();
//! assert_eq!(
//!     words,
//!     ["I", "do", "n't", "like", "(", "green", ")", "eggs", "."]
//! );
//! assert_eq!(doc.reconstruct(), "I don't like (green) eggs.");
//! ```

pub mod api;
pub mod domain;
pub mod error;
pub mod language;

pub use api::{Input, Tokenizer, TokenizerBuilder, TokenizerDescriptor};
pub use domain::{
    AffixMatcher, Document, ExceptionTable, FnAffixMatcher, NoAffixes, Position, SpacePolicy,
    SpecialCase, Token, TokenSpan, Tokens,
};
pub use error::{MatcherKind, Result, TokenizerError};
pub use language::{LanguageConfig, RegexAffixMatcher};
