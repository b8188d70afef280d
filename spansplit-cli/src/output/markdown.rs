//! Markdown output formatter

use super::{display_text, visible_tokens, OutputFormatter};
use anyhow::Result;
use spansplit_core::Document;
use std::io::Write;

/// Markdown formatter - outputs one table per document
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    skip_space: bool,
    token_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, skip_space: bool) -> Self {
        Self {
            writer,
            skip_space,
            token_count: 0,
        }
    }
}

/// Escape characters that would break a table cell
fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|").replace('`', "\\`")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, source: &str, doc: &Document) -> Result<()> {
        writeln!(self.writer, "## {}", escape_cell(source))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Token | Start | End | Space after |")?;
        writeln!(self.writer, "|---|-------|-------|-----|-------------|")?;
        for token in visible_tokens(doc, self.skip_space) {
            let span = token.span();
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                token.index(),
                escape_cell(&display_text(&token)),
                span.start,
                span.end,
                if token.trailing_space() { "yes" } else { "no" }
            )?;
            self.token_count += 1;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total tokens: {}*", self.token_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
