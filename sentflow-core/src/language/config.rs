//! Configuration structures and validation
//!
//! This module defines the TOML schema for the rule-based splitter's
//! per-language tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub terminators: Terminators,
    #[serde(default)]
    pub closers: Closers,
    #[serde(default)]
    pub suppression: Suppression,
    #[serde(default)]
    pub abbreviations: Abbreviations,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Terminator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminators {
    /// Terminators that need trailing whitespace or end of text
    pub chars: Vec<char>,
    /// Terminators that split even when text follows directly
    #[serde(default)]
    pub standalone: Vec<char>,
    #[serde(default = "default_true")]
    pub split_before_uppercase: bool,
}

/// Characters that stay attached to the sentence they close
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Closers {
    #[serde(default)]
    pub chars: Vec<char>,
}

/// Rules that veto a period boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suppression {
    #[serde(default = "default_true")]
    pub lowercase_continuation: bool,
    #[serde(default = "default_true")]
    pub single_letter_initials: bool,
}

impl Default for Suppression {
    fn default() -> Self {
        Self {
            lowercase_continuation: true,
            single_letter_initials: true,
        }
    }
}

/// Abbreviation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl LanguageConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.terminators.chars.is_empty() && self.terminators.standalone.is_empty() {
            return Err(format!(
                "no terminator characters defined for '{}'",
                self.metadata.code
            ));
        }

        if let Some(ch) = self
            .terminators
            .chars
            .iter()
            .chain(&self.terminators.standalone)
            .find(|ch| ch.is_whitespace() || ch.is_alphanumeric())
        {
            return Err(format!("terminator {ch:?} must be punctuation"));
        }

        Ok(())
    }
}
