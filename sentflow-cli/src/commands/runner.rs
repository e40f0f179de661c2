//! Shared driver for the streaming commands
//!
//! Reads every input source, replays it as a token stream through a fresh
//! segmenter and hands each unit to the output formatter with its emission
//! time.

use anyhow::{Context, Result};
use clap::Args;
use sentflow_core::language::load_language;
use sentflow_core::oracle::RuleBasedSplitter;
use sentflow_core::SentenceOracle;
use sentflow_engine::{segment, StreamSegmenter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::CliConfig;
use crate::input::{resolve_patterns, simulate_tokens, InputSource, TokenPacer};
use crate::output::{EmittedUnit, OutputFormat};
use crate::progress::ProgressReporter;
use crate::{logging, CliError};

/// Input, output and pacing options common to `segment` and `schedule`
#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Input files or patterns (supports glob); reads stdin when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SENTFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sentence oracle language code or name
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Sentence oracle backend
    #[arg(short, long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// External language table for the rule-based oracle
    #[arg(long, value_name = "FILE", conflicts_with_all = ["language", "backend"])]
    pub language_config: Option<PathBuf>,

    /// Characters per simulated token (default: one word per token)
    #[arg(long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub chunk_chars: Option<usize>,

    /// Release simulated tokens at this rate instead of all at once
    #[arg(long, value_name = "RATE", env = "SENTFLOW_TOKENS_PER_SECOND")]
    pub tokens_per_second: Option<f64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl StreamArgs {
    /// Initialize logging and load the config file
    pub fn prepare(&self) -> Result<CliConfig> {
        logging::init(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);
        CliConfig::load(self.config.as_deref())
    }

    /// Oracle for a user-supplied language table, if one was given
    pub fn custom_oracle(&self) -> Result<Option<Arc<SentenceOracle>>> {
        let Some(path) = &self.language_config else {
            return Ok(None);
        };
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read language config: {}", path.display()))?;
        let rules = load_language(&source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        log::info!("Using language table '{}' from {}", rules.code(), path.display());

        let splitter = RuleBasedSplitter::new(Arc::new(rules));
        Ok(Some(Arc::new(SentenceOracle::with_splitter(Arc::new(splitter)))))
    }

    fn sources(&self) -> Result<Vec<InputSource>> {
        if self.input.is_empty() {
            return Ok(vec![InputSource::Stdin]);
        }
        Ok(resolve_patterns(&self.input)?
            .into_iter()
            .map(InputSource::File)
            .collect())
    }

    fn writer(&self) -> Result<Box<dyn Write + Send + Sync>> {
        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        })
    }

    fn format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
                .into()
            }),
        }
    }
}

/// Segment every input with a segmenter from `make`
pub fn run<S, F>(args: &StreamArgs, config: &CliConfig, mut make: F) -> Result<()>
where
    S: StreamSegmenter,
    F: FnMut() -> sentflow_engine::Result<S>,
{
    let sources = args.sources()?;
    let format = args.format(config)?;
    let mut formatter = format.formatter(
        args.writer()?,
        config.output.pretty_json,
        config.output.include_timing,
    );

    let mut progress = ProgressReporter::new(args.quiet);
    progress.init_files(sources.len() as u64);

    for source in &sources {
        let name = source.display_name();
        let text = source.read()?;
        let tokens = simulate_tokens(&text, args.chunk_chars);
        log::info!("Segmenting {name}: {} tokens", tokens.len());

        formatter.begin_source(&name)?;
        let segmenter = make().map_err(CliError::from)?;
        let mut pacer = TokenPacer::new(args.tokens_per_second);
        let start = Instant::now();

        let mut count = 0;
        for unit in segment(segmenter, tokens.iter().inspect(|_| pacer.wait())) {
            let text = unit.map_err(CliError::from)?;
            formatter.format_unit(&EmittedUnit {
                index: count,
                text,
                elapsed_ms: start.elapsed().as_millis() as u64,
            })?;
            count += 1;
        }

        log::info!("{name}: {count} units in {:?}", start.elapsed());
        progress.file_completed(&name, count);
    }

    progress.finish();
    formatter.finish()
}
