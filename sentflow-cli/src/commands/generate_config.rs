//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Write a language table template for this code instead of a CLI config
    #[arg(short = 'l', long, value_name = "CODE")]
    pub language_code: Option<String>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let (kind, template) = match &self.language_code {
            Some(code) => ("language table", language_template(code)),
            None => ("configuration", config_template()?),
        };

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ {kind} template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the file to taste");
        match &self.language_code {
            Some(_) => {
                println!(
                    "2. Validate it:  sentflow validate --language-config {}",
                    self.output.display()
                );
                println!(
                    "3. Use it:       sentflow segment -i input.txt --language-config {}",
                    self.output.display()
                );
            }
            None => {
                println!(
                    "2. Validate it:  sentflow validate --config {}",
                    self.output.display()
                );
                println!(
                    "3. Use it:       sentflow segment -i input.txt --config {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }
}

/// Default CLI configuration, annotated
pub fn config_template() -> Result<String> {
    let body = CliConfig::default().to_toml_string()?;
    Ok(format!(
        r#"# sentflow configuration
#
# [segmenter]  context-window segmenter used by `sentflow segment`
# [scheduler]  deadline scheduler used by `sentflow schedule`
# [output]     default output format and JSON layout
#
# Per-unit scheduler settings (min_output_length, max_wait_for_fragment,
# deadline_offset_static, deadline_offset_dynamic) take one value or a list
# indexed by unit number; the last entry repeats.
#
# ignore_prefixes and avoid_pause_words fall back to the built-in lists when
# left out.

{body}"#
    ))
}

/// Commented language table for the rule-based oracle
pub fn language_template(code: &str) -> String {
    format!(
        r#"# Language table for {code}

[metadata]
code = "{code}"
name = "Custom Language"

# Characters that end a sentence when followed by whitespace or end of text
[terminators]
chars = [".", "!", "?", "…"]
# Characters that end a sentence even when text follows directly
standalone = []
# Split "end.Next" when the next character is uppercase
split_before_uppercase = true

# Quotes and brackets that stay with the sentence they close
[closers]
chars = ['"', "'", ")", "]", "}}"]

# Rules that keep a period from ending a sentence
[suppression]
# "etc. and more": a lowercase next word continues the sentence
lowercase_continuation = true
# "J. R. R. Tolkien": single uppercase letters are initials
single_letter_initials = true

# Lowercase, without the trailing period. Category names are free-form.
[abbreviations]
titles = ["dr", "mr", "mrs", "ms", "prof"]
common = ["etc", "vs", "e.g", "i.e"]
"#
    )
}
