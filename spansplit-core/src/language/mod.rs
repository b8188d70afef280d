//! Language-specific tokenization rules
//!
//! Rule sets are TOML documents (see [`LanguageConfig`]) compiled into a
//! [`RegexAffixMatcher`] plus an exception table. English is embedded;
//! other languages can be loaded from files.

pub mod config;
pub(crate) mod loader;
pub mod runtime;

pub use config::{CharClass, ContextualPattern, LanguageConfig, Metadata, SubToken};
pub use loader::{get_config, get_rules, list_available_languages, load_rules_from_file};
pub use runtime::{LanguageRules, RegexAffixMatcher};
