//! Configuration module

use anyhow::{Context, Result};
use sentflow_engine::{SchedulerConfig, SegmenterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Context-window segmenter settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Deadline scheduler settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Include emission timestamps in JSON and Markdown output
    pub include_timing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
            include_timing: true,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.segmenter.validate().map_err(CliError::from)?;
        config.scheduler.validate().map_err(CliError::from)?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
