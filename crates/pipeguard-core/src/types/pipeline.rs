//! Pipeline definitions referenced across pipelines.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::evaluatable::ProcessType;
use super::tasks::BuildStep;

/// A `(project, pipeline id)` reference to another pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PipelineRef {
    pub project: String,
    pub pipeline_id: String,
}

impl PipelineRef {
    pub fn new(project: impl Into<String>, pipeline_id: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            pipeline_id: pipeline_id.into(),
        }
    }
}

impl fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.pipeline_id)
    }
}

/// A pipeline definition as returned by the pipeline fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub id: String,
    pub project: String,
    #[serde(default)]
    pub name: String,
    pub process_type: ProcessType,
    /// Root steps; empty for YAML pipelines whose tasks are materialized elsewhere.
    #[serde(default)]
    pub steps: Vec<BuildStep>,
}

impl PipelineDefinition {
    pub fn reference(&self) -> PipelineRef {
        PipelineRef::new(self.project.as_str(), self.id.as_str())
    }
}
