//! Configuration structures and validation
//!
//! This module defines the TOML schema for language rule sets.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ExceptionTable, SpecialCase};
use crate::error::{Result, TokenizerError};

/// Root language configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub prefixes: PatternSet,
    #[serde(default)]
    pub suffixes: PatternSet,
    #[serde(default)]
    pub infixes: Infixes,
    #[serde(default)]
    pub special_cases: SpecialCases,
}

/// Language metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Ordered list of regex patterns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSet {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Infix configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infixes {
    /// Patterns that split wherever they match
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Patterns that split only between matching neighbours
    #[serde(default)]
    pub contextual: Vec<ContextualPattern>,
}

/// Infix pattern gated on the characters around the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualPattern {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<CharClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<CharClass>,
}

/// Character class for contextual infix neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Alpha,
    Digit,
    Alnum,
    Lower,
    Upper,
    /// Any character, but not the edge of the text
    Any,
}

impl CharClass {
    /// Whether `ch` belongs to this class
    #[inline]
    pub fn matches(self, ch: char) -> bool {
        match self {
            CharClass::Alpha => ch.is_alphabetic(),
            CharClass::Digit => ch.is_numeric(),
            CharClass::Alnum => ch.is_alphanumeric(),
            CharClass::Lower => ch.is_lowercase(),
            CharClass::Upper => ch.is_uppercase(),
            CharClass::Any => true,
        }
    }
}

/// Special-case configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialCases {
    /// Also register the capitalised form of lowercase keys
    #[serde(default)]
    pub title_case_variants: bool,
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<SubToken>>,
}

/// One sub-token of a special-case entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubToken {
    pub orth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<String>,
}

impl LanguageConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| TokenizerError::Configuration(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            TokenizerError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        log::debug!("loading language config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TokenizerError::Configuration(format!("cannot serialize config: {e}")))
    }

    /// Validate configuration
    ///
    /// Regexes are compiled, and special cases checked, when the rules are
    /// built; this only checks what the schema cannot express.
    pub fn validate(&self) -> Result<()> {
        let code = &self.metadata.code;
        if code.is_empty() {
            return Err(TokenizerError::Configuration(
                "metadata.code must not be empty".into(),
            ));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TokenizerError::Configuration(format!(
                "metadata.code '{code}' may only contain ASCII letters, digits, '-' and '_'"
            )));
        }
        if self.metadata.name.trim().is_empty() {
            return Err(TokenizerError::Configuration(
                "metadata.name must not be empty".into(),
            ));
        }

        let all_patterns = self
            .prefixes
            .patterns
            .iter()
            .chain(&self.suffixes.patterns)
            .chain(&self.infixes.patterns)
            .chain(self.infixes.contextual.iter().map(|c| &c.pattern));
        for pattern in all_patterns {
            if pattern.is_empty() {
                return Err(TokenizerError::Configuration(
                    "patterns must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Build the exception table described by `[special_cases]`
    pub fn exception_table(&self) -> Result<ExceptionTable> {
        let mut table = ExceptionTable::from_entries(self.special_cases.entries.iter().map(
            |(key, subs)| {
                let cases = subs
                    .iter()
                    .map(|sub| match &sub.norm {
                        Some(norm) => SpecialCase::with_norm(sub.orth.as_str(), norm.as_str()),
                        None => SpecialCase::new(sub.orth.as_str()),
                    })
                    .collect();
                (key.as_str(), cases)
            },
        ))?;
        if self.special_cases.title_case_variants {
            table.add_title_case_variants();
        }
        Ok(table)
    }

    /// Minimal configuration with the given metadata and no rules
    pub fn empty(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                code: code.into(),
                name: name.into(),
            },
            prefixes: PatternSet::default(),
            suffixes: PatternSet::default(),
            infixes: Infixes::default(),
            special_cases: SpecialCases::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[metadata]
code = "xx"
name = "Sample"

[prefixes]
patterns = ['\(']

[suffixes]
patterns = ['\)', '\.']

[infixes]
patterns = ['--']
contextual = [{ pattern = "-", before = "alpha", after = "alpha" }]

[special_cases]
title_case_variants = true

[special_cases.entries]
"don't" = [{ orth = "do" }, { orth = "n't", norm = "not" }]
"etc." = [{ orth = "etc." }]
"#;

    #[test]
    fn test_parse_sample() {
        let config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.metadata.code, "xx");
        assert_eq!(config.suffixes.patterns.len(), 2);
        assert_eq!(config.infixes.contextual[0].before, Some(CharClass::Alpha));
        assert_eq!(config.infixes.contextual[0].after, Some(CharClass::Alpha));
        assert_eq!(
            config.special_cases.entries["don't"][1].norm.as_deref(),
            Some("not")
        );
    }

    #[test]
    fn test_sections_are_optional() {
        let config = LanguageConfig::from_toml_str(
            r#"
[metadata]
code = "ws"
name = "Whitespace only"
"#,
        )
        .unwrap();
        assert!(config.prefixes.patterns.is_empty());
        assert!(config.special_cases.entries.is_empty());
        assert!(!config.special_cases.title_case_variants);
    }

    #[test]
    fn test_exception_table_with_variants() {
        let config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        let table = config.exception_table().unwrap();
        assert!(table.contains("don't"));
        assert!(table.contains("Don't"));
        assert!(table.contains("Etc."));
        assert_eq!(table.get("don't").unwrap()[1].norm.as_deref(), Some("not"));
    }

    #[test]
    fn test_bad_special_case_rejected() {
        let mut config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        config.special_cases.entries.insert(
            "won't".into(),
            vec![SubToken {
                orth: "will".into(),
                norm: None,
            }],
        );
        assert!(matches!(
            config.exception_table(),
            Err(TokenizerError::ExceptionTableMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_metadata() {
        let mut config = LanguageConfig::empty("", "Nothing");
        assert!(config.validate().is_err());
        config.metadata.code = "en us".into();
        assert!(config.validate().is_err());
        config.metadata.code = "en-us".into();
        config.metadata.name = " ".into();
        assert!(config.validate().is_err());
        config.metadata.name = "US English".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let err = LanguageConfig::from_toml_str("[metadata\ncode = 1").unwrap_err();
        assert!(matches!(err, TokenizerError::Configuration(_)));
    }

    #[test]
    fn test_unknown_char_class_rejected() {
        let source = r#"
[metadata]
code = "xx"
name = "Sample"

[infixes]
contextual = [{ pattern = "-", before = "vowel" }]
"#;
        assert!(LanguageConfig::from_toml_str(source).is_err());
    }

    #[test]
    fn test_toml_export_reparses() {
        let config = LanguageConfig::from_toml_str(SAMPLE).unwrap();
        let exported = config.to_toml_string().unwrap();
        let reparsed = LanguageConfig::from_toml_str(&exported).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_char_classes() {
        assert!(CharClass::Alpha.matches('é'));
        assert!(!CharClass::Alpha.matches('1'));
        assert!(CharClass::Digit.matches('7'));
        assert!(CharClass::Alnum.matches('7'));
        assert!(CharClass::Lower.matches('a'));
        assert!(!CharClass::Upper.matches('a'));
        assert!(CharClass::Any.matches('-'));
    }
}
