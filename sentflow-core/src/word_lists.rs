//! Heuristic word lists for the deadline scheduler
//!
//! Two lists ship embedded: avoid-pause words (function words a raw flush
//! must not end on) and delimiter ignore prefixes (abbreviations whose
//! trailing period is not a fragment boundary).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::language::tables::{MatchMode, WordSet};

const EMBEDDED_WORD_LISTS: &str = include_str!("../configs/word_lists.toml");

static EMBEDDED: OnceLock<Result<WordLists>> = OnceLock::new();

/// TOML schema: categorized lists under two tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordListsConfig {
    #[serde(default)]
    pub avoid_pause: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub ignore_prefixes: HashMap<String, Vec<String>>,
}

/// Compiled word lists
#[derive(Debug, Clone)]
pub struct WordLists {
    /// Matched case-insensitively
    pub avoid_pause: WordSet,
    /// Matched exactly, including the trailing period
    pub ignore_prefixes: WordSet,
}

impl WordLists {
    pub fn from_config(config: &WordListsConfig) -> Self {
        Self {
            avoid_pause: WordSet::from_categories(&config.avoid_pause, MatchMode::CaseInsensitive),
            ignore_prefixes: WordSet::from_categories(&config.ignore_prefixes, MatchMode::Exact),
        }
    }

    /// Parse lists from TOML text
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: WordListsConfig =
            toml::from_str(toml_str).map_err(|e| CoreError::InvalidTable {
                reason: format!("failed to parse word lists: {e}"),
            })?;
        Ok(Self::from_config(&config))
    }

    /// The lists compiled into the crate
    pub fn embedded() -> Result<&'static WordLists> {
        EMBEDDED
            .get_or_init(|| WordLists::from_toml(EMBEDDED_WORD_LISTS))
            .as_ref()
            .map_err(Clone::clone)
    }
}
