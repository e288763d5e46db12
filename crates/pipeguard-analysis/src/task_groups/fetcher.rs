//! External fetch seams for task groups and pipeline definitions.

use pipeguard_core::errors::FetchError;
use pipeguard_core::types::{BuildStep, PipelineDefinition, PipelineRef, TaskGroupId};

/// Fetches the ordered steps of one task group.
///
/// Called concurrently for disjoint ids; repeated calls for the same id
/// must return equivalent results.
pub trait TaskGroupFetcher: Send + Sync {
    fn fetch(
        &self,
        organization: &str,
        project: &str,
        task_group_id: &TaskGroupId,
    ) -> Result<Vec<BuildStep>, FetchError>;
}

/// Resolves a pipeline reference over the network.
pub trait PipelineFetcher: Send + Sync {
    fn fetch_pipeline(&self, reference: &PipelineRef) -> Result<PipelineDefinition, FetchError>;
}

/// Canonical cache key of a task-group fetch.
pub fn request_key(organization: &str, project: &str, task_group_id: &TaskGroupId) -> String {
    format!("{organization}/{project}/taskgroups/{task_group_id}").to_lowercase()
}

/// Resolves pipeline references from a pre-fetched batch, falling back to
/// a network fetcher for anything the batch does not hold.
#[derive(Clone, Copy)]
pub struct PipelineResolver<'a> {
    batch: &'a [PipelineDefinition],
    fallback: Option<&'a dyn PipelineFetcher>,
}

impl<'a> PipelineResolver<'a> {
    pub fn new(batch: &'a [PipelineDefinition]) -> Self {
        Self {
            batch,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fetcher: &'a dyn PipelineFetcher) -> Self {
        self.fallback = Some(fetcher);
        self
    }

    pub fn resolve(&self, reference: &PipelineRef) -> Result<PipelineDefinition, FetchError> {
        if let Some(found) = self.batch.iter().find(|p| {
            p.id == reference.pipeline_id && p.project.eq_ignore_ascii_case(&reference.project)
        }) {
            return Ok(found.clone());
        }
        match self.fallback {
            Some(fetcher) => fetcher.fetch_pipeline(reference),
            None => Err(FetchError::NotFound {
                kind: "pipeline",
                key: reference.to_string(),
            }),
        }
    }
}
