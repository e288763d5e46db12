//! Pipeline tasks, classic build steps, and required-task expectations.

use serde::{Deserialize, Serialize};

use super::collections::BTreeMap;
use super::identifiers::TaskGroupId;

/// A task in a materialized (YAML or flattened) pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTask {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

impl PipelineTask {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            enabled: true,
            inputs: BTreeMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Whether a classic build step runs a task or delegates to a task group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Task,
    TaskGroup,
}

/// A node in a classic pipeline's step tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Task id for `StepKind::Task`, task-group id for `StepKind::TaskGroup`.
    pub task_id: String,
    pub kind: StepKind,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

impl BuildStep {
    pub fn task(task_id: impl Into<String>) -> Self {
        Self {
            enabled: true,
            task_id: task_id.into(),
            kind: StepKind::Task,
            inputs: BTreeMap::new(),
        }
    }

    pub fn task_group(task_group_id: impl Into<String>) -> Self {
        Self {
            kind: StepKind::TaskGroup,
            ..Self::task(task_group_id)
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The referenced task group, for enabled task-group steps only.
    pub fn task_group_ref(&self) -> Option<TaskGroupId> {
        (self.enabled && self.kind == StepKind::TaskGroup)
            .then(|| TaskGroupId::new(self.task_id.as_str()))
    }
}

/// What a required task must look like to count as present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTask {
    pub task_id: String,
    #[serde(default)]
    pub required_inputs: BTreeMap<String, String>,
    /// When false only key presence of `required_inputs` is checked.
    #[serde(default)]
    pub values_matter: bool,
}

impl ExpectedTask {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            required_inputs: BTreeMap::new(),
            values_matter: false,
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.required_inputs.insert(key.into(), value.into());
        self
    }

    pub fn values_matter(mut self, values_matter: bool) -> Self {
        self.values_matter = values_matter;
        self
    }

    /// Whether an enabled materialized task satisfies this expectation.
    pub fn matches_task(&self, task: &PipelineTask) -> bool {
        task.enabled && self.matches(&task.id, &task.inputs)
    }

    /// Whether an enabled classic step runs the expected task.
    /// Task-group steps never match directly.
    pub fn matches_step(&self, step: &BuildStep) -> bool {
        step.enabled && step.kind == StepKind::Task && self.matches(&step.task_id, &step.inputs)
    }

    fn matches(&self, task_id: &str, inputs: &BTreeMap<String, String>) -> bool {
        task_id.eq_ignore_ascii_case(&self.task_id)
            && self
                .required_inputs
                .iter()
                .all(|(key, expected)| input_matches(inputs.get(key), expected, self.values_matter))
    }
}

/// Tri-state input check: a missing key fails, an empty actual value is
/// "don't care", otherwise values compare case-insensitively when they matter.
fn input_matches(actual: Option<&String>, expected: &str, values_matter: bool) -> bool {
    match actual {
        None => false,
        Some(_) if !values_matter => true,
        Some(actual) if actual.is_empty() => true,
        Some(actual) => actual.to_lowercase() == expected.to_lowercase(),
    }
}

fn enabled_by_default() -> bool {
    true
}
