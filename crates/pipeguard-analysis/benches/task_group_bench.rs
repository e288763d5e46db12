//! Criterion benchmarks for the task-group search and misuse detector.
//!
//! - Wide layer: 200 groups fanned out in one layer
//! - Deep chain: 100 nested groups, match at the bottom
//! - Cached repeat: same search served from the step cache
//! - Misuse detector over a 1K-group membership chain

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pipeguard_analysis::rules::MisuseDetector;
use pipeguard_analysis::task_groups::{CachedTaskGroupFetcher, TaskGroupFetcher, TaskGroupSearch};
use pipeguard_core::errors::FetchError;
use pipeguard_core::types::{
    BuildStep, ExpectedTask, GroupDirectory, Identity, PermissionEvaluatable, PipelineMisuse,
    TaskGroupId,
};

struct MapFetcher(HashMap<String, Vec<BuildStep>>);

impl TaskGroupFetcher for MapFetcher {
    fn fetch(
        &self,
        _organization: &str,
        _project: &str,
        task_group_id: &TaskGroupId,
    ) -> Result<Vec<BuildStep>, FetchError> {
        self.0
            .get(task_group_id.as_str())
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                kind: "task group",
                key: task_group_id.to_string(),
            })
    }
}

fn chain(depth: usize) -> MapFetcher {
    let mut groups = HashMap::new();
    for i in 0..depth {
        let next = if i + 1 == depth {
            BuildStep::task("target")
        } else {
            BuildStep::task_group(format!("g{}", i + 1))
        };
        groups.insert(format!("g{i}"), vec![BuildStep::task("noise"), next]);
    }
    MapFetcher(groups)
}

fn wide(width: usize) -> (MapFetcher, Vec<BuildStep>) {
    let mut groups = HashMap::new();
    let mut root = Vec::with_capacity(width);
    for i in 0..width {
        groups.insert(format!("w{i}"), vec![BuildStep::task(format!("task-{i}"))]);
        root.push(BuildStep::task_group(format!("w{i}")));
    }
    (MapFetcher(groups), root)
}

fn bench_search(c: &mut Criterion) {
    let expected = ExpectedTask::new("target");

    let (fetcher, root) = wide(200);
    let search = TaskGroupSearch::new(Arc::new(fetcher));
    c.bench_function("search_wide_layer_200", |b| {
        b.iter(|| search.contains_task("org", "proj", black_box(&root), &expected))
    });

    let search = TaskGroupSearch::new(Arc::new(chain(100)));
    let root = vec![BuildStep::task_group("g0")];
    c.bench_function("search_deep_chain_100", |b| {
        b.iter(|| search.contains_task("org", "proj", black_box(&root), &expected))
    });

    let cached: Arc<dyn TaskGroupFetcher> = Arc::new(CachedTaskGroupFetcher::new(
        chain(100),
        Duration::from_secs(300),
        1_000,
    ));
    let search = TaskGroupSearch::new(cached);
    c.bench_function("search_deep_chain_100_cached", |b| {
        b.iter(|| search.contains_task("org", "proj", black_box(&root), &expected))
    });
}

fn bench_misuse(c: &mut Criterion) {
    let mut directory = GroupDirectory::new();
    for i in 0..1_000 {
        directory.insert(format!("grp{i}"), vec![Identity::group(format!("grp{}", i + 1))]);
    }
    directory.insert("grp1000", vec![Identity::group("grp0")]);
    let permissions = PermissionEvaluatable::new()
        .grant(PipelineMisuse::DeletePipeline, vec![Identity::group("grp0")])
        .with_directory(directory);

    c.bench_function("misuse_cyclic_chain_1k", |b| {
        b.iter(|| MisuseDetector::new(black_box(&permissions)).is_safe(PipelineMisuse::DeletePipeline))
    });
}

criterion_group!(benches, bench_search, bench_misuse);
criterion_main!(benches);
