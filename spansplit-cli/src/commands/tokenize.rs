//! Tokenize command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputSource};
use crate::language_source::LanguageSource;
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rayon::prelude::*;
use spansplit_core::{Document, SpacePolicy, Tokenizer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Embedded language rules [default: english]
    #[arg(short, long, value_enum, conflicts_with = "language_config")]
    pub language: Option<Language>,

    /// External language configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Fold a single space after a token into that token
    #[arg(long)]
    pub absorb_spaces: bool,

    /// Leave whitespace tokens out of the output
    #[arg(long)]
    pub skip_space: bool,

    /// Check that every document reconstructs its input exactly
    #[arg(long)]
    pub verify: bool,

    /// Tokenize files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for parallel tokenization
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file with CLI defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One token per line
    Text,
    /// JSON array of documents with token offsets
    Json,
    /// Markdown table per document
    Markdown,
}

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// English language rules
    #[value(alias = "en")]
    English,
}

/// Settings after merging flags over the config file
#[derive(Debug)]
struct Settings {
    format: OutputFormat,
    source: LanguageSource,
    space_policy: SpacePolicy,
    skip_space: bool,
    verify: bool,
    parallel: bool,
    threads: Option<usize>,
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting tokenization");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let settings = self.settings(&config)?;
        log::info!("Using language rules: {}", settings.source.display_name());

        let tokenizer = settings
            .source
            .configure(Tokenizer::builder())
            .space_policy(settings.space_policy)
            .verify_output(settings.verify)
            .build()
            .map_err(CliError::from)?;

        let sources = resolve_patterns(&self.input)?;
        log::info!(
            "Found {} input(s), {} bytes on disk",
            sources.len(),
            FileReader::total_size(&sources)
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(sources.len() as u64);

        let documents = if settings.parallel && sources.len() > 1 {
            tokenize_parallel(&tokenizer, &sources, settings.threads, &progress)?
        } else {
            sources
                .iter()
                .map(|source| tokenize_source(&tokenizer, source, &progress))
                .collect::<Result<Vec<_>>>()?
        };
        progress.finish();

        let mut formatter = self.create_formatter(settings.format, settings.skip_space)?;
        let mut total_tokens = 0;
        for (source, doc) in &documents {
            total_tokens += doc.len();
            formatter.format_document(&source.to_string(), doc)?;
        }
        formatter.finish()?;

        log::info!(
            "Tokenized {} input(s) into {} tokens",
            documents.len(),
            total_tokens
        );
        Ok(())
    }

    /// Merge command-line flags over the config file
    fn settings(&self, config: &CliConfig) -> Result<Settings> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
            })?,
        };

        let source = match (&self.language_config, self.language) {
            (Some(path), _) => LanguageSource::External { path: path.clone() },
            (None, Some(language)) => LanguageSource::BuiltIn(language),
            (None, None) => {
                let language =
                    Language::from_str(&config.tokenizer.language, true).map_err(|_| {
                        CliError::ConfigError(format!(
                            "unknown language '{}'",
                            config.tokenizer.language
                        ))
                    })?;
                LanguageSource::BuiltIn(language)
            }
        };

        let space_policy = if self.absorb_spaces || config.tokenizer.absorb_spaces {
            SpacePolicy::Absorb
        } else {
            SpacePolicy::Preserve
        };

        if self.threads == Some(0) {
            return Err(CliError::ConfigError("--threads must be greater than 0".into()).into());
        }

        Ok(Settings {
            format,
            source,
            space_policy,
            skip_space: self.skip_space || config.output.skip_space,
            verify: self.verify || config.tokenizer.verify,
            parallel: self.parallel || config.performance.parallel,
            threads: self.threads.or(config.threads()),
        })
    }

    /// Create the formatter for the chosen output target
    fn create_formatter(
        &self,
        format: OutputFormat,
        skip_space: bool,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer, skip_space)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, skip_space)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, skip_space)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

fn tokenize_source(
    tokenizer: &Tokenizer,
    source: &InputSource,
    progress: &ProgressReporter,
) -> Result<(InputSource, Document)> {
    let text = FileReader::read(source)?;
    let doc = tokenizer
        .tokenize(&text)
        .with_context(|| format!("Failed to tokenize {source}"))?;
    log::debug!("{}: {} tokens", source, doc.len());
    progress.file_completed(&source.to_string());
    Ok((source.clone(), doc))
}

fn tokenize_parallel(
    tokenizer: &Tokenizer,
    sources: &[InputSource],
    threads: Option<usize>,
    progress: &ProgressReporter,
) -> Result<Vec<(InputSource, Document)>> {
    let run = || {
        sources
            .par_iter()
            .map(|source| tokenize_source(tokenizer, source, progress))
            .collect::<Result<Vec<_>>>()
    };

    match threads {
        Some(n) => {
            log::debug!("Tokenizing with {n} worker threads");
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to create thread pool")?
                .install(run)
        }
        None => run(),
    }
}
