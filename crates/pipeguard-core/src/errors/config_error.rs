//! Configuration errors.

use super::error_code::{self, PipeguardErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid rule configuration for {rule}: {message}")]
    InvalidRule { rule: String, message: String },
}

impl PipeguardErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRule { .. } => error_code::INVALID_RULE_CONFIG,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
