//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read all of stdin as UTF-8 text
    pub fn read_stdin() -> Result<String> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        Ok(content)
    }
}

/// One text to segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A resolved file path
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl InputSource {
    /// Name shown in progress output and logs
    pub fn display_name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read the whole source
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => FileReader::read_text(path),
            InputSource::Stdin => FileReader::read_stdin(),
        }
    }
}
