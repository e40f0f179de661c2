//! Markdown output formatter

use super::{EmittedUnit, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs units as a numbered list per source
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_timing: bool,
    unit_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, include_timing: bool) -> Self {
        Self {
            writer,
            include_timing,
            unit_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn begin_source(&mut self, name: &str) -> Result<()> {
        writeln!(self.writer, "## {name}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_unit(&mut self, unit: &EmittedUnit) -> Result<()> {
        self.unit_count += 1;
        if self.include_timing {
            writeln!(
                self.writer,
                "{}. {} *({} ms)*",
                unit.index + 1,
                unit.text,
                unit.elapsed_ms
            )?;
        } else {
            writeln!(self.writer, "{}. {}", unit.index + 1, unit.text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total units: {}*", self.unit_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
