//! Plain text output formatter

use super::{EmittedUnit, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one unit per line as it arrives
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_unit(&mut self, unit: &EmittedUnit) -> Result<()> {
        writeln!(self.writer, "{}", unit.text)?;
        // Units are consumed live, so each line goes out immediately
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
