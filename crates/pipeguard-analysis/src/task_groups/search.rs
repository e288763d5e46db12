//! Layered BFS over task-group references.
//!
//! Both search modes share one traversal: the root's enabled task-group steps
//! seed the frontier, each layer fetches every not-yet-visited id
//! concurrently, and the next frontier is the set of group ids referenced by
//! the steps just fetched. The visited set guarantees termination on cyclic
//! references (A -> B -> A) independent of any external cache.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use pipeguard_core::config::SearchConfig;
use pipeguard_core::constants::{TASK_DOWNLOAD_BUILD_ARTIFACTS, TASK_DOWNLOAD_PIPELINE_ARTIFACT};
use pipeguard_core::errors::{FetchError, SearchError};
use pipeguard_core::traits::{Cancellable, CancellationToken};
use pipeguard_core::types::{
    BuildStep, ExpectedTask, FxHashSet, PipelineDefinition, PipelineRef, TaskGroupId,
};

use super::fetcher::{PipelineResolver, TaskGroupFetcher};

const INPUT_PROJECT: &str = "project";
const INPUT_PIPELINE: &str = "pipeline";
const INPUT_DEFINITION: &str = "definition";

/// Searches the transitive task-group expansion of classic pipelines.
///
/// Shared across rules and threads; each call owns its own frontier and
/// visited set.
pub struct TaskGroupSearch {
    fetcher: Arc<dyn TaskGroupFetcher>,
    pool: Option<rayon::ThreadPool>,
    cancellation: CancellationToken,
}

impl TaskGroupSearch {
    /// Search fanning out on rayon's global pool.
    pub fn new(fetcher: Arc<dyn TaskGroupFetcher>) -> Self {
        Self {
            fetcher,
            pool: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Search fanning out on a dedicated pool sized by `config`.
    pub fn from_config(
        fetcher: Arc<dyn TaskGroupFetcher>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let threads = config.effective_fetch_threads();
        let pool = if threads == 0 {
            None
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("pipeguard-fetch-{i}"))
                .build()
                .map_err(|e| SearchError::ThreadPool(e.to_string()))?;
            Some(pool)
        };
        Ok(Self {
            fetcher,
            pool,
            cancellation: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Mode (a): whether `expected` runs anywhere in the transitive expansion
    /// of `root`. Stops at the first layer containing a match.
    ///
    /// A fetch failure is an error, never `Ok(false)`.
    pub fn contains_task(
        &self,
        organization: &str,
        project: &str,
        root: &[BuildStep],
        expected: &ExpectedTask,
    ) -> Result<bool, SearchError> {
        let start = Instant::now();
        let mut found = root.iter().any(|step| expected.matches_step(step));
        let mut frontier = group_refs(root.iter());
        let mut visited: FxHashSet<TaskGroupId> = FxHashSet::default();
        let mut layer = 0usize;

        while !found && !frontier.is_empty() {
            let fetched = self.next_layer(organization, project, layer, &frontier, &visited)?;
            found = fetched.iter().flatten().any(|step| expected.matches_step(step));
            visited.extend(frontier);
            frontier = group_refs(fetched.iter().flatten());
            layer += 1;
        }

        tracing::debug!(
            task = %expected.task_id,
            found,
            layers = layer,
            visited = visited.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "task-group search finished"
        );
        Ok(found)
    }

    /// Mode (b): every pipeline referenced by an enabled download-artifact step
    /// anywhere in the transitive expansion of `root`, resolved through
    /// `resolver`. Never short-circuits; results are unique by `(project, id)`
    /// in discovery order.
    pub fn collect_dependencies(
        &self,
        organization: &str,
        project: &str,
        root: &[BuildStep],
        resolver: &PipelineResolver<'_>,
    ) -> Result<Vec<PipelineDefinition>, SearchError> {
        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
        let mut dependencies = Vec::new();
        self.resolve_layer(project, root.iter(), resolver, &mut seen, &mut dependencies)?;

        let mut frontier = group_refs(root.iter());
        let mut visited: FxHashSet<TaskGroupId> = FxHashSet::default();
        let mut layer = 0usize;

        while !frontier.is_empty() {
            let fetched = self.next_layer(organization, project, layer, &frontier, &visited)?;
            self.resolve_layer(
                project,
                fetched.iter().flatten(),
                resolver,
                &mut seen,
                &mut dependencies,
            )?;
            visited.extend(frontier);
            frontier = group_refs(fetched.iter().flatten());
            layer += 1;
        }

        tracing::debug!(
            dependencies = dependencies.len(),
            layers = layer,
            "dependency collection finished"
        );
        Ok(dependencies)
    }

    /// Checks cancellation, then fetches `frontier - visited` concurrently.
    fn next_layer(
        &self,
        organization: &str,
        project: &str,
        layer: usize,
        frontier: &BTreeSet<TaskGroupId>,
        visited: &FxHashSet<TaskGroupId>,
    ) -> Result<Vec<Vec<BuildStep>>, SearchError> {
        if self.cancellation.is_cancelled() {
            return Err(SearchError::Cancelled { layers: layer });
        }
        let todo: Vec<&TaskGroupId> = frontier.iter().filter(|id| !visited.contains(*id)).collect();
        tracing::debug!(
            search_layer = layer,
            layer_fetches = todo.len(),
            "fetching task-group layer"
        );
        let fetched = self.fan_out(|| {
            todo.par_iter()
                .map(|id| self.fetcher.fetch(organization, project, id))
                .collect::<Result<Vec<_>, FetchError>>()
        })?;
        Ok(fetched)
    }

    /// Resolves the not-yet-seen pipelines referenced by `steps`.
    fn resolve_layer<'s>(
        &self,
        project: &str,
        steps: impl Iterator<Item = &'s BuildStep>,
        resolver: &PipelineResolver<'_>,
        seen: &mut BTreeSet<(String, String)>,
        out: &mut Vec<PipelineDefinition>,
    ) -> Result<(), SearchError> {
        let mut fresh = Vec::new();
        for reference in steps.filter_map(|step| dependency_ref(project, step)) {
            if seen.insert(dedup_key(&reference)) {
                fresh.push(reference);
            }
        }
        if fresh.is_empty() {
            return Ok(());
        }
        let resolved = self.fan_out(|| {
            fresh
                .par_iter()
                .map(|reference| resolver.resolve(reference))
                .collect::<Result<Vec<_>, FetchError>>()
        })?;
        out.extend(resolved);
        Ok(())
    }

    fn fan_out<T, F>(&self, op: F) -> Result<T, FetchError>
    where
        T: Send,
        F: FnOnce() -> Result<T, FetchError> + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Distinct ids of the enabled task-group steps among `steps`.
fn group_refs<'s>(steps: impl Iterator<Item = &'s BuildStep>) -> BTreeSet<TaskGroupId> {
    steps.filter_map(BuildStep::task_group_ref).collect()
}

/// The pipeline a download-artifact step consumes from, if `step` is one.
///
/// An empty project input means the current project. Steps without a
/// pipeline id are skipped.
fn dependency_ref(project: &str, step: &BuildStep) -> Option<PipelineRef> {
    let id_key = if download_pipeline_artifact().matches_step(step) {
        INPUT_PIPELINE
    } else if download_build_artifacts().matches_step(step) {
        INPUT_DEFINITION
    } else {
        return None;
    };

    let pipeline_id = step.inputs.get(id_key).map(String::as_str).unwrap_or_default();
    if pipeline_id.is_empty() {
        tracing::debug!(task = %step.task_id, "download step without a source pipeline");
        return None;
    }
    let source_project = match step.inputs.get(INPUT_PROJECT).map(String::as_str) {
        Some(p) if !p.is_empty() => p,
        _ => project,
    };
    Some(PipelineRef::new(source_project, pipeline_id))
}

/// Project names compare case-insensitively, as the resolver matches them.
fn dedup_key(reference: &PipelineRef) -> (String, String) {
    (reference.project.to_lowercase(), reference.pipeline_id.clone())
}

fn download_pipeline_artifact() -> ExpectedTask {
    ExpectedTask::new(TASK_DOWNLOAD_PIPELINE_ARTIFACT)
        .with_input(INPUT_PROJECT, "")
        .with_input(INPUT_PIPELINE, "")
}

fn download_build_artifacts() -> ExpectedTask {
    ExpectedTask::new(TASK_DOWNLOAD_BUILD_ARTIFACTS)
        .with_input(INPUT_PROJECT, "")
        .with_input(INPUT_DEFINITION, "")
}
