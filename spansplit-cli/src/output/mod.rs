//! Output formatting module

use anyhow::Result;
use spansplit_core::{Document, Token};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the tokens of one document
    fn format_document(&mut self, source: &str, doc: &Document) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Tokens to print, optionally leaving out whitespace runs
pub(crate) fn visible_tokens(doc: &Document, skip_space: bool) -> impl Iterator<Item = Token<'_>> {
    doc.iter().filter(move |token| !(skip_space && token.is_space()))
}

/// Printable form of a token: whitespace is escaped and quoted
pub(crate) fn display_text(token: &Token<'_>) -> String {
    if token.is_space() {
        format!("{:?}", token.text())
    } else {
        token.text().to_string()
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
