//! List command implementation

use anyhow::Result;
use clap::ValueEnum;
use sentflow_core::language::supported_languages;
use sentflow_core::oracle::BUILTIN_BACKENDS;

use super::ListCommands;
use crate::output::OutputFormat;

/// Print the requested listing to stdout
pub fn execute(subcommand: ListCommands) -> Result<()> {
    for line in lines(subcommand) {
        println!("{line}");
    }
    Ok(())
}

fn lines(subcommand: ListCommands) -> Vec<String> {
    match subcommand {
        ListCommands::Backends => {
            let mut lines: Vec<String> = BUILTIN_BACKENDS.iter().map(|b| b.to_string()).collect();
            lines.push("custom (library use only)".to_string());
            lines
        }
        ListCommands::Languages => supported_languages()
            .into_iter()
            .map(|(code, name)| format!("{code}\t{name}"))
            .collect(),
        ListCommands::Formats => OutputFormat::value_variants()
            .iter()
            .filter_map(|format| format.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect(),
    }
}
