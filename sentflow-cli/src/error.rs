//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Segmentation error from the engine
    SegmentationError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SegmentationError(msg) => write!(f, "Segmentation error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<sentflow_engine::EngineError> for CliError {
    fn from(err: sentflow_engine::EngineError) -> Self {
        if err.is_configuration() {
            CliError::ConfigError(err.to_string())
        } else {
            CliError::SegmentationError(err.to_string())
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sentflow_core::CoreError;
    use sentflow_engine::EngineError;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("test.txt".to_string()).to_string(),
            "File not found: test.txt"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("bad rate".to_string()).to_string(),
            "Configuration error: bad rate"
        );
    }

    #[test]
    fn test_engine_error_conversion() {
        let config: CliError = EngineError::ConfigError("zero context".to_string()).into();
        assert!(matches!(config, CliError::ConfigError(_)));

        let failure: CliError = EngineError::Core(CoreError::OracleFailure {
            backend: "custom".to_string(),
            reason: "boom".to_string(),
        })
        .into();
        assert!(matches!(failure, CliError::SegmentationError(_)));
    }

    #[test]
    fn test_error_with_special_characters() {
        let error = CliError::FileNotFound("ファイル/test 文件.txt".to_string());
        assert_eq!(error.to_string(), "File not found: ファイル/test 文件.txt");
    }
}
