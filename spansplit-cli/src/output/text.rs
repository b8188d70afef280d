//! Plain text output formatter

use super::{display_text, visible_tokens, OutputFormatter};
use anyhow::Result;
use spansplit_core::Document;
use std::io::{self, Write};

/// Plain text formatter - outputs one token per line
///
/// Whitespace tokens are printed quoted and escaped; documents are
/// separated by an empty line.
pub struct TextFormatter<W: Write> {
    writer: W,
    skip_space: bool,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, skip_space: bool) -> Self {
        Self {
            writer,
            skip_space,
            documents: 0,
        }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout(skip_space: bool) -> Self {
        Self::new(io::stdout(), skip_space)
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, _source: &str, doc: &Document) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;
        for token in visible_tokens(doc, self.skip_space) {
            writeln!(self.writer, "{}", display_text(&token))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
