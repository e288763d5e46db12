//! Task-group graph search.
//!
//! Classic pipelines delegate steps to reusable task groups, which may
//! delegate further. The search walks that graph layer by layer, fetching
//! each layer's groups concurrently through a shared, time-bounded cache.

pub mod cache;
pub mod fetcher;
pub mod search;

pub use cache::CachedTaskGroupFetcher;
pub use fetcher::{request_key, PipelineFetcher, PipelineResolver, TaskGroupFetcher};
pub use search::TaskGroupSearch;
