//! Public tokenizer API
//!
//! Wraps the domain layer in a [`Tokenizer`] that owns its rules, resolves
//! [`Input`] values to text and hands back [`Document`](crate::Document)s.

mod input;
mod tokenizer;

pub use input::Input;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerDescriptor};
