//! Task-group graph search errors.

use super::error_code::{self, PipeguardErrorCode};
use super::FetchError;

/// Errors that leave a graph search unable to determine its answer.
///
/// None of these mean "task not found": a caller must treat them as an
/// incomplete evaluation, never as a compliance failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    #[error("Fetch failed during search: {0}")]
    Fetch(#[from] FetchError),

    #[error("Search cancelled after {layers} layer(s)")]
    Cancelled { layers: usize },

    #[error("Fetch thread pool could not be built: {0}")]
    ThreadPool(String),
}

impl PipeguardErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Fetch(e) => e.error_code(),
            Self::Cancelled { .. } => error_code::CANCELLED,
            Self::ThreadPool(_) => error_code::THREAD_POOL_ERROR,
        }
    }
}
