//! Reading input text

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use super::InputSource;

pub struct FileReader;

impl FileReader {
    /// Read a source as UTF-8 text
    pub fn read(source: &InputSource) -> Result<String> {
        match source {
            InputSource::File(path) => Self::read_text(path),
            InputSource::Stdin => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read standard input")?;
                Ok(content)
            }
        }
    }

    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }

    /// Total size of the file sources, for progress display
    pub fn total_size(sources: &[InputSource]) -> u64 {
        sources
            .iter()
            .filter_map(|source| match source {
                InputSource::File(path) => Self::file_size(path).ok(),
                InputSource::Stdin => None,
            })
            .sum()
    }
}
