//! Domain layer for rule-based tokenization
//!
//! Everything here works on borrowed text and plain rule tables: spans,
//! the affix cascade, the whitespace driver and the resulting documents.

pub mod builder;
pub mod document;
pub mod exceptions;
pub mod matcher;
pub mod segmenter;
pub mod span;

pub use builder::SpanBuilder;
pub use document::{Document, Token, Tokens};
pub use exceptions::{ExceptionTable, SpecialCase};
pub use matcher::{AffixMatcher, FnAffixMatcher, NoAffixes};
pub use segmenter::{Segmenter, SpacePolicy};
pub use span::{Position, TokenSpan};
