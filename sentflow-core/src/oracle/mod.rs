//! Sentence oracle
//!
//! The oracle splits a text blob into sentences. Segmenters only ever see
//! the [`SentenceOracle`] handle; which splitter sits behind it is decided
//! once, at construction or on [`SentenceOracle::initialize`].

mod custom;
mod rules;
mod unicode;

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::error::{CoreError, Result};
use crate::language::loader;

pub use custom::FnSplitter;
pub use rules::RuleBasedSplitter;
pub use unicode::UnicodeSplitter;

/// Backend identifier of the rule-based splitter
pub const RULES_BACKEND: &str = "rules";
/// Backend identifier of the UAX #29 splitter
pub const UNICODE_BACKEND: &str = "unicode";
/// Identifier reported by handles built around user code
pub const CUSTOM_BACKEND: &str = "custom";

/// Built-in backends selectable by name
pub const BUILTIN_BACKENDS: &[&str] = &[RULES_BACKEND, UNICODE_BACKEND];

/// Splits text into sentences.
///
/// Implementations must be deterministic and keep every non-whitespace
/// character of the input, in order, across the returned sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<String>>;
}

/// Caller-owned handle to a sentence splitter
pub struct SentenceOracle {
    backend: String,
    language: String,
    splitter: OnceLock<Arc<dyn SentenceSplitter>>,
}

impl SentenceOracle {
    /// Handle for a built-in backend. Nothing is loaded until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(backend: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            language: language.into(),
            splitter: OnceLock::new(),
        }
    }

    /// Handle around an existing splitter, ready for use
    pub fn with_splitter(splitter: Arc<dyn SentenceSplitter>) -> Self {
        let oracle = Self::new(CUSTOM_BACKEND, "");
        let _ = oracle.splitter.set(splitter);
        oracle
    }

    /// Handle around an infallible splitting function
    pub fn from_fn<F>(split: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::with_splitter(Arc::new(FnSplitter::infallible(split)))
    }

    /// Handle around a splitting function that may fail
    pub fn try_from_fn<F>(split: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Vec<String>, String> + Send + Sync + 'static,
    {
        Self::with_splitter(Arc::new(FnSplitter::fallible(split)))
    }

    /// Resolve the backend and load its tables. Calling this again is a no-op.
    pub fn initialize(&self) -> Result<()> {
        if self.splitter.get().is_some() {
            return Ok(());
        }

        let splitter: Arc<dyn SentenceSplitter> = match self.backend.as_str() {
            RULES_BACKEND => Arc::new(RuleBasedSplitter::new(loader::get_rules(&self.language)?)),
            UNICODE_BACKEND => Arc::new(UnicodeSplitter),
            other => {
                return Err(CoreError::UnknownBackend {
                    backend: other.to_string(),
                })
            }
        };

        tracing::debug!(
            backend = %self.backend,
            language = %self.language,
            "sentence oracle initialized"
        );
        let _ = self.splitter.set(splitter);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.splitter.get().is_some()
    }

    /// Split `text` into sentences
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        let splitter = self.splitter.get().ok_or_else(|| CoreError::NotInitialized {
            backend: self.backend.clone(),
        })?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let sentences = splitter.split(text)?;
        tracing::trace!(
            backend = %self.backend,
            sentences = sentences.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "split sentences"
        );
        Ok(sentences)
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for SentenceOracle {
    fn default() -> Self {
        Self::new(RULES_BACKEND, "en")
    }
}

impl fmt::Debug for SentenceOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceOracle")
            .field("backend", &self.backend)
            .field("language", &self.language)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_before_initialize_fails() {
        let oracle = SentenceOracle::default();
        let err = oracle.split("One. Two.").unwrap_err();
        assert!(matches!(err, CoreError::NotInitialized { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let oracle = SentenceOracle::default();
        oracle.initialize().unwrap();
        oracle.initialize().unwrap();
        assert!(oracle.is_initialized());
        assert_eq!(
            oracle.split("One sentence. Another one.").unwrap(),
            vec!["One sentence.", "Another one."]
        );
    }

    #[test]
    fn test_unknown_backend() {
        let oracle = SentenceOracle::new("nltk", "en");
        let err = oracle.initialize().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownBackend {
                backend: "nltk".to_string()
            }
        );
        assert!(!oracle.is_initialized());
    }

    #[test]
    fn test_unsupported_language() {
        let oracle = SentenceOracle::new(RULES_BACKEND, "xx");
        assert!(matches!(
            oracle.initialize(),
            Err(CoreError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        let oracle = SentenceOracle::new(UNICODE_BACKEND, "any");
        oracle.initialize().unwrap();
        assert!(oracle.split("   ").unwrap().is_empty());
    }

    #[test]
    fn test_custom_function() {
        let oracle = SentenceOracle::from_fn(|text| {
            text.split('|').map(|s| s.trim().to_string()).collect()
        });
        assert!(oracle.is_initialized());
        oracle.initialize().unwrap();
        assert_eq!(oracle.backend(), CUSTOM_BACKEND);
        assert_eq!(oracle.split("a | b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_failure_is_not_configuration() {
        let oracle = SentenceOracle::try_from_fn(|_| Err("model crashed".to_string()));
        let err = oracle.split("text").unwrap_err();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("model crashed"));
    }
}
