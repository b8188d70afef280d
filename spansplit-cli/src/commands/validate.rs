//! Validate command implementation

use anyhow::Result;
use clap::Args;
use spansplit_core::language::{LanguageConfig, LanguageRules};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        // Parsing checks the schema; compiling checks every pattern and special case
        let checked = LanguageConfig::from_file(&self.language_config)
            .and_then(|config| LanguageRules::from_config(&config).map(|rules| (config, rules)));

        match checked {
            Ok((config, rules)) => {
                println!("✓ Configuration is valid!");
                println!("  Language code: {}", rules.code());
                println!("  Language name: {}", rules.name());
                println!("  Prefix patterns: {}", config.prefixes.patterns.len());
                println!("  Suffix patterns: {}", config.suffixes.patterns.len());
                println!(
                    "  Infix patterns: {} ({} contextual)",
                    config.infixes.patterns.len() + config.infixes.contextual.len(),
                    config.infixes.contextual.len()
                );
                println!("  Special cases: {}", rules.exceptions().len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
