//! JSON output formatter

use super::{EmittedUnit, OutputFormatter};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs every source as an object holding its units
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sources: Vec<SourceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct SourceData {
    /// Input file name, or `<stdin>`
    pub source: String,
    /// Units in emission order
    pub units: Vec<EmittedUnit>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            sources: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin_source(&mut self, name: &str) -> Result<()> {
        self.sources.push(SourceData {
            source: name.to_string(),
            units: Vec::new(),
        });
        Ok(())
    }

    fn format_unit(&mut self, unit: &EmittedUnit) -> Result<()> {
        if self.sources.is_empty() {
            self.begin_source("<input>")?;
        }
        if let Some(source) = self.sources.last_mut() {
            source.units.push(unit.clone());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.sources)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.sources)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
