//! Shared fixtures for pipeguard-analysis integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use pipeguard_analysis::task_groups::{PipelineFetcher, TaskGroupFetcher};
use pipeguard_core::errors::FetchError;
use pipeguard_core::types::{BuildStep, PipelineDefinition, PipelineRef, TaskGroupId};

/// In-memory task-group store that counts fetches per id.
#[derive(Default)]
pub struct FakeFetcher {
    groups: HashMap<String, Vec<BuildStep>>,
    failing: HashSet<String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, id: &str, steps: Vec<BuildStep>) -> Self {
        self.groups.insert(id.to_string(), steps);
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self, id: &str) -> usize {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl TaskGroupFetcher for FakeFetcher {
    fn fetch(
        &self,
        organization: &str,
        project: &str,
        task_group_id: &TaskGroupId,
    ) -> Result<Vec<BuildStep>, FetchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(task_group_id.to_string())
            .or_default() += 1;
        let key = format!("{organization}/{project}/taskgroups/{task_group_id}");
        if self.failing.contains(task_group_id.as_str()) {
            return Err(FetchError::Failed {
                key,
                message: "service unavailable".to_string(),
            });
        }
        self.groups
            .get(task_group_id.as_str())
            .cloned()
            .ok_or(FetchError::NotFound {
                kind: "task group",
                key,
            })
    }
}

/// Network fallback for pipeline definitions.
#[derive(Default)]
pub struct FakePipelines {
    pipelines: Vec<PipelineDefinition>,
    calls: Mutex<usize>,
}

impl FakePipelines {
    pub fn new(pipelines: Vec<PipelineDefinition>) -> Self {
        Self {
            pipelines,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl PipelineFetcher for FakePipelines {
    fn fetch_pipeline(&self, reference: &PipelineRef) -> Result<PipelineDefinition, FetchError> {
        *self.calls.lock().unwrap() += 1;
        self.pipelines
            .iter()
            .find(|p| p.reference() == *reference)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                kind: "pipeline",
                key: reference.to_string(),
            })
    }
}
