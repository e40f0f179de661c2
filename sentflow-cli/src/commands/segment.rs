//! Segment command implementation

use anyhow::Result;
use clap::Args;
use sentflow_engine::{ContextWindowSegmenter, SegmenterConfig};
use std::sync::Arc;

use super::runner::{self, StreamArgs};
use crate::config::CliConfig;
use crate::CliError;

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub stream: StreamArgs,

    /// Start from the low-latency preset instead of the config file
    #[arg(long)]
    pub realtime: bool,

    /// Emit the first fragment as soon as it is long enough
    #[arg(long)]
    pub quick_yield: bool,

    /// Keep quick-yielding the first fragment of every sentence
    #[arg(long)]
    pub quick_yield_all: bool,

    /// Units shorter than this many characters merge forward
    #[arg(long, value_name = "CHARS")]
    pub min_sentence_length: Option<usize>,

    /// Characters of trailing context before a split is attempted
    #[arg(long, value_name = "CHARS")]
    pub context_size: Option<usize>,

    /// Strip links and emojis from emitted units
    #[arg(long)]
    pub cleanup: bool,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        let cli_config = self.stream.prepare()?;
        let config = self.segmenter_config(&cli_config)?;
        log::debug!("Segmenter config: {config:?}");

        // One oracle for every input file
        let oracle = match self.stream.custom_oracle()? {
            Some(oracle) => oracle,
            None => Arc::new(config.oracle()),
        };
        runner::run(&self.stream, &cli_config, || {
            ContextWindowSegmenter::with_oracle(config.clone(), Arc::clone(&oracle))
        })
    }

    /// Config file settings with command-line overrides applied
    pub fn segmenter_config(&self, cli_config: &CliConfig) -> Result<SegmenterConfig> {
        let mut config = if self.realtime {
            SegmenterConfig::realtime()
        } else {
            cli_config.segmenter.clone()
        };

        if self.quick_yield {
            config.quick_yield_single_sentence_fragment = true;
        }
        if self.quick_yield_all {
            config.quick_yield_for_all_sentences = true;
        }
        if let Some(length) = self.min_sentence_length {
            config.minimum_sentence_length = length;
        }
        if let Some(size) = self.context_size {
            config.context_size = size;
        }
        if self.cleanup {
            config.cleanup_links = true;
            config.cleanup_emojis = true;
        }
        if let Some(language) = &self.stream.language {
            config.language = language.clone();
        }
        if let Some(backend) = &self.stream.backend {
            config.tokenizer_backend = backend.clone();
        }

        config.validate().map_err(CliError::from)?;
        Ok(config)
    }
}
