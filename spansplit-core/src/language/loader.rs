//! Language configuration loader
//!
//! Manages embedded and file-based language rules with caching.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{Result, TokenizerError};
use crate::language::config::LanguageConfig;
use crate::language::runtime::LanguageRules;

/// Embedded configurations as `(code, alias, TOML source)`
const EMBEDDED_SOURCES: &[(&str, &str, &str)] = &[(
    "en",
    "english",
    include_str!("../../configs/languages/english.toml"),
)];

/// Compiled embedded languages, keyed by code and alias
static EMBEDDED: OnceLock<HashMap<String, Arc<LanguageRules>>> = OnceLock::new();

fn embedded() -> &'static HashMap<String, Arc<LanguageRules>> {
    EMBEDDED.get_or_init(|| {
        let mut map = HashMap::new();
        for (code, alias, source) in EMBEDDED_SOURCES {
            match load_embedded_language(source) {
                Ok(rules) => {
                    let rules = Arc::new(rules);
                    map.insert(code.to_string(), Arc::clone(&rules));
                    map.insert(alias.to_string(), rules);
                }
                Err(e) => {
                    log::error!("failed to load embedded '{code}' config: {e}");
                }
            }
        }
        map
    })
}

fn load_embedded_language(source: &str) -> Result<LanguageRules> {
    let config = LanguageConfig::from_toml_str(source)?;
    LanguageRules::from_config(&config)
}

/// Load embedded language rules by code or alias (case-insensitive)
pub fn get_rules(code: &str) -> Result<Arc<LanguageRules>> {
    embedded()
        .get(&code.to_ascii_lowercase())
        .cloned()
        .ok_or_else(|| TokenizerError::UnsupportedLanguage(code.to_string()))
}

/// Embedded configuration by code or alias, for export
pub fn get_config(code: &str) -> Result<LanguageConfig> {
    let wanted = code.to_ascii_lowercase();
    EMBEDDED_SOURCES
        .iter()
        .find(|&&(code, alias, _)| code == wanted || alias == wanted)
        .map(|(_, _, source)| LanguageConfig::from_toml_str(source))
        .unwrap_or_else(|| Err(TokenizerError::UnsupportedLanguage(code.to_string())))
}

/// Compile rules from a configuration file
///
/// File-based rules are not cached.
pub fn load_rules_from_file<P: AsRef<Path>>(path: P) -> Result<LanguageRules> {
    let config = LanguageConfig::from_file(path)?;
    LanguageRules::from_config(&config)
}

/// `(code, name)` of every embedded language
pub fn list_available_languages() -> Vec<(&'static str, String)> {
    EMBEDDED_SOURCES
        .iter()
        .filter_map(|(code, _, _)| {
            embedded()
                .get(*code)
                .map(|rules| (*code, rules.name().to_string()))
        })
        .collect()
}
