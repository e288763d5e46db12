//! Task-group graph search configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FETCH_THREADS;

/// Configuration for the task-group graph search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Threads used to fan out one layer's fetches. 0 = rayon default.
    pub fetch_threads: Option<usize>,
}

impl SearchConfig {
    pub fn effective_fetch_threads(&self) -> usize {
        self.fetch_threads.unwrap_or(DEFAULT_FETCH_THREADS)
    }
}
