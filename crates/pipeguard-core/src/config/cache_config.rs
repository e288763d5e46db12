//! Task-group step cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECONDS};

/// Configuration for the shared task-group step cache.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached step list in seconds. Default: 300.
    pub ttl_seconds: Option<u64>,
    /// Maximum number of cached step lists. Default: 10000.
    pub max_entries: Option<u64>,
}

impl CacheConfig {
    /// Returns the effective time-to-live.
    pub fn effective_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS))
    }

    /// Returns the effective capacity.
    pub fn effective_max_entries(&self) -> u64 {
        self.max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES)
    }
}
