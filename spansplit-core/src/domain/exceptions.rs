//! Special-case exception table
//!
//! Maps an exact token text to the fixed sub-tokens it splits into. Every
//! entry is validated on insertion so the cascade can trust the declared
//! lengths when it lays out spans.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, TokenizerError};

/// One sub-token of a special case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCase {
    /// Surface text as it appears in the source
    pub orth: String,
    /// Canonical text, when it differs from the surface
    pub norm: Option<Arc<str>>,
}

impl SpecialCase {
    /// Sub-token with surface text only
    pub fn new(orth: impl Into<String>) -> Self {
        Self {
            orth: orth.into(),
            norm: None,
        }
    }

    /// Sub-token with a canonical form
    pub fn with_norm(orth: impl Into<String>, norm: impl Into<Arc<str>>) -> Self {
        Self {
            orth: orth.into(),
            norm: Some(norm.into()),
        }
    }

    /// Declared length in characters
    #[inline]
    pub fn char_len(&self) -> usize {
        self.orth.chars().count()
    }
}

/// Lookup table of special cases
#[derive(Debug, Clone, Default)]
pub struct ExceptionTable {
    entries: HashMap<String, Arc<[SpecialCase]>>,
}

impl ExceptionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, sub-tokens)` pairs
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<SpecialCase>)>,
        K: Into<String>,
    {
        let mut table = Self::new();
        for (key, cases) in entries {
            table.insert(key, cases)?;
        }
        Ok(table)
    }

    /// Add or replace an entry
    ///
    /// Rejects entries whose sub-token lengths do not add up to the key's
    /// length, since they would produce overlapping or gapped spans.
    pub fn insert(&mut self, key: impl Into<String>, cases: Vec<SpecialCase>) -> Result<()> {
        let key = key.into();
        Self::validate(&key, &cases)?;
        self.entries.insert(key, cases.into());
        Ok(())
    }

    fn validate(key: &str, cases: &[SpecialCase]) -> Result<()> {
        if key.is_empty() {
            return Err(TokenizerError::Configuration(
                "special case key must not be empty".into(),
            ));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(TokenizerError::Configuration(format!(
                "special case key '{key}' contains whitespace and can never match"
            )));
        }
        if cases.is_empty() {
            return Err(TokenizerError::Configuration(format!(
                "special case '{key}' has no sub-tokens"
            )));
        }
        if cases.iter().any(|case| case.orth.is_empty()) {
            return Err(TokenizerError::Configuration(format!(
                "special case '{key}' has an empty sub-token"
            )));
        }

        let expected = key.chars().count();
        let actual: usize = cases.iter().map(SpecialCase::char_len).sum();
        if expected != actual {
            return Err(TokenizerError::ExceptionTableMismatch {
                key: key.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Sub-tokens for `text`, if it is a key
    #[inline]
    pub fn get(&self, text: &str) -> Option<&[SpecialCase]> {
        self.entries.get(text).map(|cases| &cases[..])
    }

    /// Whether `text` is a key
    #[inline]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpecialCase])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), &v[..]))
    }

    /// Register the title-cased form of every lowercase-initial key
    ///
    /// `"don't" -> [do, n't]` gains `"Don't" -> [Do, n't]`. Existing keys
    /// are never overwritten.
    pub fn add_title_case_variants(&mut self) {
        let variants: Vec<(String, Vec<SpecialCase>)> = self
            .entries
            .iter()
            .filter_map(|(key, cases)| {
                let titled = title_case(key)?;
                if self.entries.contains_key(&titled) {
                    return None;
                }
                let mut cases = cases.to_vec();
                cases[0].orth = title_case(&cases[0].orth)?;
                Some((titled, cases))
            })
            .collect();

        for (key, cases) in variants {
            // Uppercasing can change a character's length (e.g. 'ß' -> "SS"),
            // so variants go through validation like any other entry.
            if let Err(e) = self.insert(key.clone(), cases) {
                log::debug!("skipping title-case variant '{key}': {e}");
            }
        }
    }
}

/// Uppercase the first character if it is lowercase
fn title_case(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !first.is_lowercase() {
        return None;
    }
    let mut titled: String = first.to_uppercase().collect();
    titled.push_str(chars.as_str());
    Some(titled)
}
