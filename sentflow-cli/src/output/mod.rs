//! Output formatting module

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One unit as it left a segmenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedUnit {
    /// Position in the output sequence of its source
    pub index: usize,
    /// The unit text
    pub text: String,
    /// Milliseconds since the source's first chunk was pushed
    pub elapsed_ms: u64,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Start a new input source
    fn begin_source(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Format and output a single unit
    fn format_unit(&mut self, unit: &EmittedUnit) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one unit per line
    Text,
    /// JSON array of units with timing
    Json,
    /// Markdown formatted output
    Markdown,
}

impl OutputFormat {
    /// Parse a format name from a config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Build the formatter for this format
    pub fn formatter(
        self,
        writer: Box<dyn Write + Send + Sync>,
        pretty_json: bool,
        include_timing: bool,
    ) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, include_timing)),
        }
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
