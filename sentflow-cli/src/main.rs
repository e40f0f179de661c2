//! sentflow command-line entry point

use clap::Parser;
use sentflow_cli::commands::Commands;

/// Segment streamed text into sentence-sized units
#[derive(Debug, Parser)]
#[command(name = "sentflow", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
