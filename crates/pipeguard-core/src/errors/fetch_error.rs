//! Errors raised by external fetchers (task groups, pipeline definitions).

use super::error_code::{self, PipeguardErrorCode};

/// Failure of a single external fetch.
///
/// `Clone` because the step cache shares one error among every caller
/// waiting on the same key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Fetch of {key} failed: {message}")]
    Failed { key: String, message: String },

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },
}

impl FetchError {
    /// Canonical request key of the failed fetch.
    pub fn key(&self) -> &str {
        match self {
            Self::Failed { key, .. } | Self::NotFound { key, .. } => key,
        }
    }
}

impl PipeguardErrorCode for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => error_code::FETCH_FAILED,
            Self::NotFound { .. } => error_code::NOT_FOUND,
        }
    }
}
