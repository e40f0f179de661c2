//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod generate_config;
pub mod list;
pub mod runner;
pub mod schedule;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment a simulated token stream with the context-window segmenter
    Segment(segment::SegmentArgs),

    /// Pace units to a reading rate with the deadline scheduler
    Schedule(schedule::ScheduleArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file or language table
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List sentence oracle backends
    Backends,

    /// List built-in language tables
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::Schedule(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}
