//! Validate command implementation

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use sentflow_core::language::load_language;
use sentflow_core::oracle::RuleBasedSplitter;
use sentflow_core::SentenceSplitter;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).multiple(true)))]
pub struct ValidateArgs {
    /// CLI configuration file to validate
    #[arg(short, long, value_name = "FILE", group = "target")]
    pub config: Option<PathBuf>,

    /// Language table to validate
    #[arg(long, value_name = "FILE", group = "target")]
    pub language_config: Option<PathBuf>,

    /// Split this text with the language table and print the sentences
    #[arg(long, value_name = "TEXT", requires = "language_config")]
    pub sample: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.config {
            println!("Validating configuration: {}", path.display());
            match CliConfig::from_file(path) {
                Ok(_) => println!("✓ Configuration is valid!"),
                Err(e) => {
                    println!("✗ Configuration is invalid!");
                    println!("  Error: {e:#}");
                    return Err(anyhow::anyhow!("Validation failed: {e:#}"));
                }
            }
        }

        if let Some(path) = &self.language_config {
            println!("Validating language table: {}", path.display());
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            match load_language(&source) {
                Ok(rules) => {
                    println!("✓ Language table is valid!");
                    println!("  Language code: {}", rules.code());
                    println!("  Language name: {}", rules.name());

                    if let Some(sample) = &self.sample {
                        let splitter = RuleBasedSplitter::new(Arc::new(rules));
                        for (i, sentence) in splitter.split(sample)?.iter().enumerate() {
                            println!("  [{i}] {sentence}");
                        }
                    }
                }
                Err(e) => {
                    println!("✗ Language table is invalid!");
                    println!("  Error: {e}");
                    return Err(anyhow::anyhow!("Validation failed: {}", e));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_validate_valid_language_table() {
        let file = temp_file(
            r#"
[metadata]
code = "test"
name = "Test Language"

[terminators]
chars = ["."]
"#,
        );
        let args = ValidateArgs {
            config: None,
            language_config: Some(file.path().to_path_buf()),
            sample: Some("One. Two.".to_string()),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_language_table() {
        let file = temp_file(
            r#"
[metadata]
code = "test"
name = "Test"

[terminators]
chars = []
"#,
        );
        let args = ValidateArgs {
            config: None,
            language_config: Some(file.path().to_path_buf()),
            sample: None,
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_cli_config() {
        let good = temp_file("[scheduler]\nlead_time = 0.0\n");
        let args = ValidateArgs {
            config: Some(good.path().to_path_buf()),
            language_config: None,
            sample: None,
        };
        assert!(args.execute().is_ok());

        let bad = temp_file("[scheduler]\ntarget_words_per_second = -1.0\n");
        let args = ValidateArgs {
            config: Some(bad.path().to_path_buf()),
            language_config: None,
            sample: None,
        };
        assert!(args.execute().is_err());
    }
}
