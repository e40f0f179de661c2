//! Core error types

use thiserror::Error;

/// Errors raised by the sentence oracle and its lookup tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Backend identifier not recognized
    #[error("unknown tokenizer backend '{backend}'")]
    UnknownBackend {
        /// The identifier that was requested
        backend: String,
    },

    /// Backend has no rules for the requested language
    #[error("backend '{backend}' does not support language '{language}'")]
    UnsupportedLanguage {
        /// Backend that was asked
        backend: String,
        /// The language code that is not supported
        language: String,
    },

    /// `split` called before `initialize`
    #[error("sentence oracle '{backend}' used before initialization")]
    NotInitialized {
        /// Backend that was not initialized
        backend: String,
    },

    /// Embedded or user supplied table could not be loaded
    #[error("invalid table: {reason}")]
    InvalidTable {
        /// What went wrong while loading
        reason: String,
    },

    /// The splitter itself failed during a call
    #[error("sentence oracle '{backend}' failed: {reason}")]
    OracleFailure {
        /// Backend that failed
        backend: String,
        /// Failure description reported by the splitter
        reason: String,
    },
}

impl CoreError {
    /// Configuration problems are fatal and never worth retrying.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, CoreError::OracleFailure { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
