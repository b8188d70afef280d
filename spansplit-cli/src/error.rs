//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Tokenization error from core
    TokenizeError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::TokenizeError(msg) => write!(f, "Tokenization error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<spansplit_core::TokenizerError> for CliError {
    fn from(err: spansplit_core::TokenizerError) -> Self {
        use spansplit_core::TokenizerError;

        match err {
            TokenizerError::Configuration(_)
            | TokenizerError::UnsupportedLanguage(_)
            | TokenizerError::ExceptionTableMismatch { .. } => {
                CliError::ConfigError(err.to_string())
            }
            other => CliError::TokenizeError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
