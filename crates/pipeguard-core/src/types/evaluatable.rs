//! Fact snapshots consumed by rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collections::BTreeMap;
use super::identity::{GroupDirectory, Identity};
use super::misuse::{MisuseKind, PipelineMisuse, ProjectMisuse, RepositoryMisuse};
use super::tasks::{BuildStep, PipelineTask};

/// Names the variant of an `Evaluatable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactKind {
    Tasks,
    ClassicPipeline,
    PipelinePermissions,
    RepositoryPermissions,
    ProjectPermissions,
    Resource,
    Settings,
}

impl FactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::ClassicPipeline => "classic-pipeline",
            Self::PipelinePermissions => "pipeline-permissions",
            Self::RepositoryPermissions => "repository-permissions",
            Self::ProjectPermissions => "project-permissions",
            Self::Resource => "resource",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed fact snapshot of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "facts", rename_all = "kebab-case")]
pub enum Evaluatable {
    Tasks(TaskContainingEvaluatable),
    ClassicPipeline(ClassicPipelineEvaluatable),
    PipelinePermissions(PermissionEvaluatable<PipelineMisuse>),
    RepositoryPermissions(PermissionEvaluatable<RepositoryMisuse>),
    ProjectPermissions(PermissionEvaluatable<ProjectMisuse>),
    Resource(ResourceEvaluatable),
    Settings(SettingsEvaluatable),
}

impl Evaluatable {
    pub fn kind(&self) -> FactKind {
        match self {
            Self::Tasks(_) => FactKind::Tasks,
            Self::ClassicPipeline(_) => FactKind::ClassicPipeline,
            Self::PipelinePermissions(_) => FactKind::PipelinePermissions,
            Self::RepositoryPermissions(_) => FactKind::RepositoryPermissions,
            Self::ProjectPermissions(_) => FactKind::ProjectPermissions,
            Self::Resource(_) => FactKind::Resource,
            Self::Settings(_) => FactKind::Settings,
        }
    }
}

/// Ordered task list of a materialized pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContainingEvaluatable {
    pub tasks: Vec<PipelineTask>,
}

impl TaskContainingEvaluatable {
    pub fn new(tasks: Vec<PipelineTask>) -> Self {
        Self { tasks }
    }
}

/// Root step tree of a classic pipeline, expanded lazily through task groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicPipelineEvaluatable {
    pub organization: String,
    pub project: String,
    pub steps: Vec<BuildStep>,
}

impl ClassicPipelineEvaluatable {
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        steps: Vec<BuildStep>,
    ) -> Self {
        Self {
            organization: organization.into(),
            project: project.into(),
            steps,
        }
    }
}

/// Which identities were explicitly granted each misuse capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: MisuseKind"))]
pub struct PermissionEvaluatable<K> {
    #[serde(default)]
    pub grants: BTreeMap<K, Vec<Identity>>,
    #[serde(default)]
    pub directory: GroupDirectory,
}

impl<K: MisuseKind> PermissionEvaluatable<K> {
    pub fn new() -> Self {
        Self {
            grants: BTreeMap::new(),
            directory: GroupDirectory::new(),
        }
    }

    /// Record identities granted `kind` (appending to earlier grants).
    pub fn grant(mut self, kind: K, identities: Vec<Identity>) -> Self {
        self.grants.entry(kind).or_default().extend(identities);
        self
    }

    pub fn with_directory(mut self, directory: GroupDirectory) -> Self {
        self.directory = directory;
        self
    }

    /// Identities granted `kind`, if any entry exists.
    pub fn granted(&self, kind: K) -> Option<&[Identity]> {
        self.grants.get(&kind).map(Vec::as_slice)
    }
}

impl<K: MisuseKind> Default for PermissionEvaluatable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// How a pipeline is authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    Yaml,
    Classic,
}

/// Process-type and artifact-usage flags of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEvaluatable {
    pub process_type: ProcessType,
    #[serde(default)]
    pub uses_build_artifact: bool,
    #[serde(default)]
    pub artifact_from_secure_branch: bool,
}

/// A single named setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

/// Named settings of a resource (retention, approvals, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEvaluatable {
    pub settings: BTreeMap<String, SettingValue>,
}

impl SettingsEvaluatable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    /// Integer setting; `None` when absent or not an integer.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.settings.get(key) {
            Some(SettingValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Boolean setting; `None` when absent or not a boolean.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.settings.get(key) {
            Some(SettingValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }
}
