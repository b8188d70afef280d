//! JSON output formatter

use super::{visible_tokens, OutputFormatter};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use spansplit_core::{Document, Token};
use std::io::Write;

/// JSON formatter - outputs documents as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    skip_space: bool,
    documents: Vec<DocumentData>,
}

/// One document in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    /// Where the text came from
    pub source: String,
    /// Tokens in document order
    pub tokens: Vec<TokenData>,
}

/// One token in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    /// The token text
    pub text: String,
    /// Character offset of the first character
    pub start: usize,
    /// Character offset of the last character (inclusive)
    pub end: usize,
    /// Whether whitespace follows the token
    pub trailing_space: bool,
    /// Whether the token is a whitespace run
    pub is_space: bool,
    /// Canonical form from a special case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<String>,
}

impl From<Token<'_>> for TokenData {
    fn from(token: Token<'_>) -> Self {
        let span = token.span();
        Self {
            text: token.text().to_string(),
            start: span.start,
            end: span.end,
            trailing_space: token.trailing_space(),
            is_space: token.is_space(),
            norm: span.norm.as_deref().map(str::to_string),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, skip_space: bool) -> Self {
        Self {
            writer,
            skip_space,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &str, doc: &Document) -> Result<()> {
        self.documents.push(DocumentData {
            source: source.to_string(),
            tokens: visible_tokens(doc, self.skip_space)
                .map(TokenData::from)
                .collect(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spansplit_core::Tokenizer;

    #[test]
    fn test_json_structure() {
        let tokenizer = Tokenizer::for_language("en").unwrap();
        let doc = tokenizer.tokenize("I don't").unwrap();

        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, true);
            formatter.format_document("input.txt", &doc).unwrap();
            formatter.finish().unwrap();
        }

        let parsed: Vec<DocumentData> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].source, "input.txt");

        let texts: Vec<&str> = parsed[0].tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["I", "do", "n't"]);
        assert_eq!(parsed[0].tokens[2].norm.as_deref(), Some("not"));
        assert_eq!((parsed[0].tokens[1].start, parsed[0].tokens[1].end), (2, 3));
        assert!(parsed[0].tokens[0].trailing_space);
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, false);
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "[]");
    }
}
