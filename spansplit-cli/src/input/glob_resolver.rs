//! Input pattern resolution using glob

use anyhow::{Context, Result};
use glob::glob;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// One resolved input
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputSource {
    /// Standard input, requested with `-`
    Stdin,
    /// A regular file
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve input patterns to sources
///
/// `-` stands for standard input. A pattern naming an existing file is
/// taken literally, so file names containing glob metacharacters work.
/// Duplicates are dropped and the order of first appearance is kept.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut sources = Vec::new();

    for pattern in patterns {
        if pattern == "-" {
            sources.push(InputSource::Stdin);
            continue;
        }
        if Path::new(pattern).is_file() {
            sources.push(InputSource::File(PathBuf::from(pattern)));
            continue;
        }

        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;
        let mut matched: Vec<PathBuf> = Vec::new();
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                matched.push(path);
            }
        }
        if matched.is_empty() {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }
        matched.sort();
        sources.extend(matched.into_iter().map(InputSource::File));
    }

    let mut seen = std::collections::HashSet::new();
    sources.retain(|source| seen.insert(source.clone()));
    log::debug!("Resolved {} input(s)", sources.len());
    Ok(sources)
}
