//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

pub mod generate_config;
pub mod tokenize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tokenize text files
    Tokenize(tokenize::TokenizeArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a language configuration file
    Validate(validate::ValidateArgs),

    /// Generate a language configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available language rules
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Tokenize(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) -> Result<()> {
        for line in self.lines() {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Languages => {
                let mut lines = vec!["Available languages:".to_string()];
                lines.extend(
                    spansplit_core::language::list_available_languages()
                        .into_iter()
                        .map(|(code, name)| format!("  {code:<8} {name}")),
                );
                lines
            }
            ListCommands::Formats => {
                let mut lines = vec!["Available output formats:".to_string()];
                lines.extend(
                    tokenize::OutputFormat::value_variants()
                        .iter()
                        .filter_map(|format| format.to_possible_value())
                        .map(|value| {
                            let help = value.get_help().map(ToString::to_string);
                            format!("  {:<8} {}", value.get_name(), help.unwrap_or_default())
                        }),
                );
                lines
            }
        }
    }
}
