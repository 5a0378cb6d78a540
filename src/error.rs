//! Error types for ContentCraft
//!
//! Centralized error handling using thiserror. Completion and tool failures
//! have their own types (`LlmError`, `ToolError`) because dispatch reports
//! them differently.

use thiserror::Error;

/// Errors raised while setting up ContentCraft components
#[derive(Debug, Error)]
pub enum ContentCraftError {
    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for ContentCraft operations
pub type Result<T> = std::result::Result<T, ContentCraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = ContentCraftError::Config("bad base_url".to_string());
        assert_eq!(err.to_string(), "Config error: bad base_url");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ContentCraftError::Config("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
