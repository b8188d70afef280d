//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use spansplit_core::language::get_config;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Start from the rules of an embedded language instead of the template
    #[arg(long, value_name = "LANG")]
    pub from: Option<String>,
}

const TEMPLATE: &str = r#"# Language configuration for {code}

[metadata]
code = "{code}"
name = "Custom Language"

# Stripped from the start of a whitespace-free run, first match wins
[prefixes]
patterns = [
    '\.\.\.+',
    '''[("'\[{]''',
    '[$€£]',
]

# Stripped from the end of a run, first match wins
[suffixes]
patterns = [
    '\.\.\.+',
    '''[)"'\]}]''',
    '[,;:!?]',
    '%',
    '\.',
]

# Split wherever they occur inside a run
[infixes]
patterns = [
    '\.\.\.+',
    '-{2,}',
]

# Split only between the given neighbours
# Classes: alpha, digit, alnum, lower, upper, any
contextual = [
    { pattern = "-", before = "alpha", after = "alpha" },
    { pattern = "/", before = "alpha", after = "alpha" },
]

[special_cases]
# Also register "Don't" for "don't"
title_case_variants = true

# Each entry maps a whole token to sub-tokens whose texts join back to it
[special_cases.entries]
"don't" = [{ orth = "do" }, { orth = "n't", norm = "not" }]
"e.g." = [{ orth = "e.g." }]
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating language configuration template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        let content = match &self.from {
            Some(base) => {
                println!("  Based on: {base}");
                self.export_embedded(base)?
            }
            None => self.generate_template(),
        };

        fs::write(&self.output, content)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to customize tokenization rules");
        println!("2. Validate your configuration:");
        println!(
            "   spansplit validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for tokenization:");
        println!(
            "   spansplit tokenize -i input.txt --language-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        TEMPLATE.replace("{code}", &self.language_code)
    }

    /// Serialize an embedded language under the new code
    fn export_embedded(&self, base: &str) -> Result<String> {
        let mut config =
            get_config(base).with_context(|| format!("Cannot export language '{base}'"))?;
        config.metadata.code = self.language_code.clone();
        let body = config.to_toml_string()?;
        Ok(format!(
            "# Language configuration for {}, based on {}\n\n{}",
            self.language_code, base, body
        ))
    }
}
