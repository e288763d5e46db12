//! Shared task-group step cache.
//!
//! Uses `moka::sync::Cache` with a short TTL: the same group is commonly
//! referenced by many pipelines scanned in one batch. Concurrent callers
//! asking for the same key share a single underlying fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use pipeguard_core::config::CacheConfig;
use pipeguard_core::errors::FetchError;
use pipeguard_core::types::{BuildStep, TaskGroupId};

use super::fetcher::{request_key, TaskGroupFetcher};

/// A `TaskGroupFetcher` memoizing another fetcher by canonical request key.
/// Failed fetches are not cached.
pub struct CachedTaskGroupFetcher<F> {
    inner: F,
    cache: Cache<String, Arc<Vec<BuildStep>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<F: TaskGroupFetcher> CachedTaskGroupFetcher<F> {
    pub fn new(inner: F, ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(inner: F, config: &CacheConfig) -> Self {
        Self::new(inner, config.effective_ttl(), config.effective_max_entries())
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Total cache hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total cache misses (underlying fetches started).
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let h = self.hits() as f64;
        let total = h + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }

    /// Invalidate all cache entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<F: TaskGroupFetcher> TaskGroupFetcher for CachedTaskGroupFetcher<F> {
    fn fetch(
        &self,
        organization: &str,
        project: &str,
        task_group_id: &TaskGroupId,
    ) -> Result<Vec<BuildStep>, FetchError> {
        let key = request_key(organization, project, task_group_id);
        let mut loaded = false;
        let steps = self
            .cache
            .try_get_with(key, || {
                loaded = true;
                self.inner
                    .fetch(organization, project, task_group_id)
                    .map(Arc::new)
            })
            .map_err(|e| (*e).clone())?;

        if loaded {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(task_group = %task_group_id, "task-group cache miss");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(steps.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl TaskGroupFetcher for Counting {
        fn fetch(
            &self,
            _organization: &str,
            _project: &str,
            task_group_id: &TaskGroupId,
        ) -> Result<Vec<BuildStep>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Failed {
                    key: task_group_id.to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(vec![BuildStep::task("t")])
        }
    }

    fn cached(fail: bool) -> CachedTaskGroupFetcher<Counting> {
        CachedTaskGroupFetcher::new(
            Counting {
                calls: AtomicUsize::new(0),
                fail,
            },
            Duration::from_secs(60),
            100,
        )
    }

    #[test]
    fn second_fetch_is_served_from_cache() {
        let fetcher = cached(false);
        let id = TaskGroupId::new("g");
        fetcher.fetch("org", "proj", &id).unwrap();
        fetcher.fetch("ORG", "proj", &id).unwrap();
        assert_eq!(fetcher.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.hits(), 1);
        assert_eq!(fetcher.misses(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let fetcher = cached(true);
        let id = TaskGroupId::new("g");
        assert!(fetcher.fetch("org", "proj", &id).is_err());
        assert!(fetcher.fetch("org", "proj", &id).is_err());
        assert_eq!(fetcher.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn key_is_case_insensitive() {
        assert_eq!(
            request_key("Org", "Proj", &TaskGroupId::new("ABC")),
            "org/proj/taskgroups/abc"
        );
    }
}
