//! Segmenter and scheduler configuration
//!
//! Both configurations are plain data with serde support, so they can be
//! loaded from TOML. Builders validate before handing a configuration out.

use serde::{Deserialize, Serialize};
use sentflow_core::{
    DelimiterSearch, MatchMode, SentenceOracle, WordLists, WordSet, DEFAULT_PREFERRED_DELIMITERS,
    DEFAULT_SECONDARY_DELIMITERS, RULES_BACKEND,
};

use crate::error::{EngineError, Result};
use crate::params::PerUnit;

/// Characters after which a fragment may end
pub const DEFAULT_FRAGMENT_DELIMITERS: &str = ".?!;:,\n…)]}。-";

/// Characters that end a whole sentence
pub const DEFAULT_FULL_SENTENCE_DELIMITERS: &str = ".?!\n…。";

/// Words per LLM token, used to turn token rates into word rates
pub const WORDS_PER_TOKEN: f64 = 0.75;

/// Context-window segmenter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Characters of trailing context the oracle needs past a delimiter
    pub context_size: usize,
    /// Units shorter than this (in characters) merge into the next one
    pub minimum_sentence_length: usize,
    /// Length the first unit must exceed before a quick yield
    pub minimum_first_fragment_length: usize,
    /// Emit the first fragment as soon as possible
    pub quick_yield_single_sentence_fragment: bool,
    /// Re-arm the quick yield after every completed sentence
    pub quick_yield_for_all_sentences: bool,
    /// Keep quick-yielding every fragment, not just the first
    pub quick_yield_every_fragment: bool,
    /// Strip hyperlinks from emitted units
    pub cleanup_links: bool,
    /// Strip emojis from emitted units
    pub cleanup_emojis: bool,
    /// Characters that may end a fragment
    pub sentence_fragment_delimiters: String,
    /// Characters that end a full sentence
    pub full_sentence_delimiters: String,
    /// Word count that forces the first fragment out
    pub force_first_fragment_after_words: usize,
    /// Sentence oracle backend
    pub tokenizer_backend: String,
    /// Sentence oracle language
    pub language: String,
    /// Trace every consumed character
    pub log_characters: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            context_size: 12,
            minimum_sentence_length: 10,
            minimum_first_fragment_length: 10,
            quick_yield_single_sentence_fragment: false,
            quick_yield_for_all_sentences: false,
            quick_yield_every_fragment: false,
            cleanup_links: false,
            cleanup_emojis: false,
            sentence_fragment_delimiters: DEFAULT_FRAGMENT_DELIMITERS.to_string(),
            full_sentence_delimiters: DEFAULT_FULL_SENTENCE_DELIMITERS.to_string(),
            force_first_fragment_after_words: 15,
            tokenizer_backend: RULES_BACKEND.to_string(),
            language: "en".to_string(),
            log_characters: false,
        }
    }
}

impl SegmenterConfig {
    /// Start a builder from the defaults
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::new()
    }

    /// Preset for speech synthesis: the first fragment goes out quickly
    pub fn realtime() -> Self {
        Self {
            quick_yield_single_sentence_fragment: true,
            minimum_sentence_length: 3,
            minimum_first_fragment_length: 3,
            cleanup_links: true,
            cleanup_emojis: true,
            ..Default::default()
        }
    }

    /// Parse from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EngineError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and delimiter sets
    pub fn validate(&self) -> Result<()> {
        if self.context_size == 0 {
            return Err(EngineError::ConfigError(
                "context_size must be at least 1".to_string(),
            ));
        }
        if self.sentence_fragment_delimiters.is_empty() {
            return Err(EngineError::ConfigError(
                "sentence_fragment_delimiters cannot be empty".to_string(),
            ));
        }
        if self.tokenizer_backend.is_empty() {
            return Err(EngineError::ConfigError(
                "tokenizer_backend cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Uninitialized oracle handle for the configured backend
    pub fn oracle(&self) -> SentenceOracle {
        SentenceOracle::new(&self.tokenizer_backend, &self.language)
    }
}

/// Builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trailing context size
    pub fn context_size(mut self, size: usize) -> Self {
        self.config.context_size = size;
        self
    }

    /// Set the minimum unit length
    pub fn minimum_sentence_length(mut self, length: usize) -> Self {
        self.config.minimum_sentence_length = length;
        self
    }

    /// Set the minimum first fragment length
    pub fn minimum_first_fragment_length(mut self, length: usize) -> Self {
        self.config.minimum_first_fragment_length = length;
        self
    }

    /// Enable or disable the first-fragment quick yield
    pub fn quick_yield(mut self, enabled: bool) -> Self {
        self.config.quick_yield_single_sentence_fragment = enabled;
        self
    }

    /// Re-arm the quick yield after every sentence
    pub fn quick_yield_for_all_sentences(mut self, enabled: bool) -> Self {
        self.config.quick_yield_for_all_sentences = enabled;
        self
    }

    /// Quick-yield every fragment
    pub fn quick_yield_every_fragment(mut self, enabled: bool) -> Self {
        self.config.quick_yield_every_fragment = enabled;
        self
    }

    /// Enable link and emoji removal
    pub fn cleanup(mut self, links: bool, emojis: bool) -> Self {
        self.config.cleanup_links = links;
        self.config.cleanup_emojis = emojis;
        self
    }

    /// Set the fragment delimiter characters
    pub fn sentence_fragment_delimiters<S: Into<String>>(mut self, delimiters: S) -> Self {
        self.config.sentence_fragment_delimiters = delimiters.into();
        self
    }

    /// Set the full sentence delimiter characters
    pub fn full_sentence_delimiters<S: Into<String>>(mut self, delimiters: S) -> Self {
        self.config.full_sentence_delimiters = delimiters.into();
        self
    }

    /// Set the word count that forces the first fragment out
    pub fn force_first_fragment_after_words(mut self, words: usize) -> Self {
        self.config.force_first_fragment_after_words = words;
        self
    }

    /// Select the oracle backend
    pub fn tokenizer_backend<S: Into<String>>(mut self, backend: S) -> Self {
        self.config.tokenizer_backend = backend.into();
        self
    }

    /// Set the oracle language
    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.config.language = language.into();
        self
    }

    /// Trace each consumed character
    pub fn log_characters(mut self, enabled: bool) -> Self {
        self.config.log_characters = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SegmenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Deadline scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds to buffer before the first unit may be emitted
    pub lead_time: f64,
    /// Assumed consumption rate of the downstream reader
    pub target_words_per_second: f64,
    /// Minimum words per unit, by unit index
    pub min_output_length: PerUnit<usize>,
    /// Grace period before a raw buffer flush, by unit index
    pub max_wait_for_fragment: PerUnit<f64>,
    /// Constant deadline compression in seconds, by unit index
    pub deadline_offset_static: PerUnit<f64>,
    /// Deadline compression per candidate word, in word-durations
    pub deadline_offset_dynamic: PerUnit<f64>,
    /// Terminal delimiters, tried first
    pub preferred_delimiters: Vec<String>,
    /// Fragment delimiters, tried when no preferred one fits
    pub secondary_delimiters: Vec<String>,
    /// Abbreviations that suppress a delimiter; embedded list when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_prefixes: Option<Vec<String>>,
    /// Words a raw flush must not end on; embedded list when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_pause_words: Option<Vec<String>>,
    /// Sentence oracle backend
    pub tokenizer_backend: String,
    /// Sentence oracle language
    pub language: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lead_time: 1.0,
            target_words_per_second: 4.0 * WORDS_PER_TOKEN,
            min_output_length: PerUnit::new(vec![2, 3, 3, 4]),
            max_wait_for_fragment: PerUnit::new(vec![3.0, 2.0]),
            deadline_offset_static: PerUnit::constant(1.0),
            deadline_offset_dynamic: PerUnit::constant(0.0),
            preferred_delimiters: DEFAULT_PREFERRED_DELIMITERS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            secondary_delimiters: DEFAULT_SECONDARY_DELIMITERS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            ignore_prefixes: None,
            avoid_pause_words: None,
            tokenizer_backend: RULES_BACKEND.to_string(),
            language: "en".to_string(),
        }
    }
}

impl SchedulerConfig {
    /// Start a builder from the defaults
    pub fn builder() -> SchedulerConfigBuilder {
        SchedulerConfigBuilder::new()
    }

    /// Parse from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EngineError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check rates, per-unit lists and delimiters
    pub fn validate(&self) -> Result<()> {
        if !(self.target_words_per_second.is_finite() && self.target_words_per_second > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "target_words_per_second must be positive, got {}",
                self.target_words_per_second
            )));
        }
        if !(self.lead_time.is_finite() && self.lead_time >= 0.0) {
            return Err(EngineError::ConfigError(format!(
                "lead_time must be non-negative, got {}",
                self.lead_time
            )));
        }
        if self.min_output_length.is_empty() {
            return Err(EngineError::ConfigError(
                "min_output_length needs at least one value".to_string(),
            ));
        }
        for (name, values) in [
            ("max_wait_for_fragment", &self.max_wait_for_fragment),
            ("deadline_offset_static", &self.deadline_offset_static),
            ("deadline_offset_dynamic", &self.deadline_offset_dynamic),
        ] {
            if values.is_empty() {
                return Err(EngineError::ConfigError(format!(
                    "{name} needs at least one value"
                )));
            }
            if values.values().iter().any(|v| !v.is_finite()) {
                return Err(EngineError::ConfigError(format!(
                    "{name} values must be finite"
                )));
            }
        }
        if self.max_wait_for_fragment.values().iter().any(|v| *v < 0.0) {
            return Err(EngineError::ConfigError(
                "max_wait_for_fragment values must be non-negative".to_string(),
            ));
        }
        if self.preferred_delimiters.iter().all(String::is_empty)
            && self.secondary_delimiters.iter().all(String::is_empty)
        {
            return Err(EngineError::ConfigError(
                "at least one delimiter is required".to_string(),
            ));
        }
        if self.tokenizer_backend.is_empty() {
            return Err(EngineError::ConfigError(
                "tokenizer_backend cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Seconds one word takes at the target rate
    pub fn seconds_per_word(&self) -> f64 {
        1.0 / self.target_words_per_second
    }

    /// Uninitialized oracle handle for the configured backend
    pub fn oracle(&self) -> SentenceOracle {
        SentenceOracle::new(&self.tokenizer_backend, &self.language)
    }

    /// Delimiter search over the configured delimiters and ignore prefixes
    pub fn delimiter_search(&self) -> Result<DelimiterSearch> {
        let ignore_prefixes = match &self.ignore_prefixes {
            Some(words) => WordSet::new(words.iter().cloned(), MatchMode::Exact),
            None => WordLists::embedded()?.ignore_prefixes.clone(),
        };
        Ok(DelimiterSearch::new(
            self.preferred_delimiters.clone(),
            self.secondary_delimiters.clone(),
            ignore_prefixes,
        ))
    }

    /// Avoid-pause words, case-insensitive
    pub fn avoid_pause_set(&self) -> Result<WordSet> {
        Ok(match &self.avoid_pause_words {
            Some(words) => WordSet::new(words.iter().cloned(), MatchMode::CaseInsensitive),
            None => WordLists::embedded()?.avoid_pause.clone(),
        })
    }
}

/// Builder for [`SchedulerConfig`]
#[derive(Debug, Default)]
pub struct SchedulerConfigBuilder {
    config: SchedulerConfig,
}

impl SchedulerConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lead time in seconds
    pub fn lead_time(mut self, seconds: f64) -> Self {
        self.config.lead_time = seconds;
        self
    }

    /// Set the target rate in words per second
    pub fn target_words_per_second(mut self, rate: f64) -> Self {
        self.config.target_words_per_second = rate;
        self
    }

    /// Set the target rate in LLM tokens per second
    pub fn target_tokens_per_second(mut self, rate: f64) -> Self {
        self.config.target_words_per_second = rate * WORDS_PER_TOKEN;
        self
    }

    /// Set the per-unit minimum word counts
    pub fn min_output_length<V: Into<PerUnit<usize>>>(mut self, lengths: V) -> Self {
        self.config.min_output_length = lengths.into();
        self
    }

    /// Set the per-unit grace periods
    pub fn max_wait_for_fragment<V: Into<PerUnit<f64>>>(mut self, seconds: V) -> Self {
        self.config.max_wait_for_fragment = seconds.into();
        self
    }

    /// Set the static deadline offsets
    pub fn deadline_offset_static<V: Into<PerUnit<f64>>>(mut self, seconds: V) -> Self {
        self.config.deadline_offset_static = seconds.into();
        self
    }

    /// Set the dynamic deadline offsets
    pub fn deadline_offset_dynamic<V: Into<PerUnit<f64>>>(mut self, factors: V) -> Self {
        self.config.deadline_offset_dynamic = factors.into();
        self
    }

    /// Replace the preferred delimiters
    pub fn preferred_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preferred_delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the secondary delimiters
    pub fn secondary_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.secondary_delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the embedded ignore prefixes
    pub fn ignore_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ignore_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the embedded avoid-pause words
    pub fn avoid_pause_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.avoid_pause_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Select the oracle backend
    pub fn tokenizer_backend<S: Into<String>>(mut self, backend: S) -> Self {
        self.config.tokenizer_backend = backend.into();
        self
    }

    /// Set the oracle language
    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.config.language = language.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SchedulerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
