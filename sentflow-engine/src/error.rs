//! Layered error types

use sentflow_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Oracle or table error
    #[error("sentence oracle error: {0}")]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
}

impl EngineError {
    /// True for errors that no amount of retrying will fix
    pub fn is_configuration(&self) -> bool {
        match self {
            EngineError::Core(core) => core.is_configuration(),
            EngineError::ConfigError(_) | EngineError::ParseError(_) => true,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
