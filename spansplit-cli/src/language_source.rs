//! Language source management for CLI

use crate::commands::tokenize::Language;
use spansplit_core::TokenizerBuilder;
use std::path::PathBuf;

/// Source of tokenization rules
#[derive(Debug, Clone)]
pub enum LanguageSource {
    /// Embedded language
    BuiltIn(Language),
    /// External configuration file
    External {
        /// Path to the configuration file
        path: PathBuf,
    },
}

impl LanguageSource {
    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(lang) => format!("Built-in: {}", lang.as_str()),
            LanguageSource::External { path } => format!("External: {}", path.display()),
        }
    }

    /// Point a tokenizer builder at these rules
    pub fn configure(&self, builder: TokenizerBuilder) -> TokenizerBuilder {
        match self {
            LanguageSource::BuiltIn(lang) => builder.language(lang.code()),
            LanguageSource::External { path } => builder.config_file(path.clone()),
        }
    }
}

impl Language {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
        }
    }

    /// Get language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
        }
    }
}
