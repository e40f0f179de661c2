//! Schedule command implementation

use anyhow::Result;
use clap::Args;
use sentflow_engine::{DeadlineScheduler, SchedulerConfig, SystemClock, WORDS_PER_TOKEN};
use std::sync::Arc;

use super::runner::{self, StreamArgs};
use crate::config::CliConfig;
use crate::CliError;

/// Arguments for the schedule command
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub stream: StreamArgs,

    /// Seconds to buffer before the first unit
    #[arg(long, value_name = "SECONDS")]
    pub lead_time: Option<f64>,

    /// Reading rate of the consumer in words per second
    #[arg(long, value_name = "RATE", conflicts_with = "target_tokens_per_second")]
    pub target_words_per_second: Option<f64>,

    /// Reading rate of the consumer in LLM tokens per second
    #[arg(long, value_name = "RATE")]
    pub target_tokens_per_second: Option<f64>,
}

impl ScheduleArgs {
    /// Execute the schedule command
    pub fn execute(&self) -> Result<()> {
        let cli_config = self.stream.prepare()?;
        let config = self.scheduler_config(&cli_config)?;
        log::debug!("Scheduler config: {config:?}");

        let oracle = match self.stream.custom_oracle()? {
            Some(oracle) => oracle,
            None => Arc::new(config.oracle()),
        };
        runner::run(&self.stream, &cli_config, || {
            DeadlineScheduler::with_clock(config.clone(), Arc::clone(&oracle), SystemClock)
        })
    }

    /// Config file settings with command-line overrides applied
    pub fn scheduler_config(&self, cli_config: &CliConfig) -> Result<SchedulerConfig> {
        let mut config = cli_config.scheduler.clone();

        if let Some(lead_time) = self.lead_time {
            config.lead_time = lead_time;
        }
        if let Some(rate) = self.target_words_per_second {
            config.target_words_per_second = rate;
        }
        if let Some(rate) = self.target_tokens_per_second {
            config.target_words_per_second = rate * WORDS_PER_TOKEN;
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScheduleArgs,
    }

    fn parse(argv: &[&str]) -> ScheduleArgs {
        let mut full = vec!["schedule"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_token_rate_converts_to_words() {
        let args = parse(&["--target-tokens-per-second", "8", "--lead-time", "0.25"]);
        let config = args.scheduler_config(&CliConfig::default()).unwrap();
        assert_eq!(config.target_words_per_second, 6.0);
        assert_eq!(config.lead_time, 0.25);
    }

    #[test]
    fn test_rates_conflict() {
        let mut argv = vec!["schedule", "--target-words-per-second", "2"];
        argv.extend(["--target-tokens-per-second", "3"]);
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let args = parse(&["--target-words-per-second", "0"]);
        assert!(args.scheduler_config(&CliConfig::default()).is_err());
    }
}
