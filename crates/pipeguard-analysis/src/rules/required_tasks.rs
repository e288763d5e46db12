//! All-of composition: a pipeline must run every expected task.

use std::sync::Arc;

use pipeguard_core::errors::{ConfigError, RuleError, SearchError};
use pipeguard_core::types::{
    ClassicPipelineEvaluatable, EvaluationResult, Evaluatable, ExpectedTask, FactKind,
    SmallVec4, TaskContainingEvaluatable,
};

use super::types::{invalid_argument, Rule, RuleMetadata};
use crate::task_groups::TaskGroupSearch;

/// Passes iff every expectation has at least one enabled, matching task.
///
/// Materialized task lists are checked in memory. Classic pipelines are only
/// accepted when a `TaskGroupSearch` is attached; each expectation is then
/// proven through the transitive task-group expansion.
pub struct RequiredTasksRule {
    metadata: RuleMetadata,
    expectations: SmallVec4<ExpectedTask>,
    task_groups: Option<Arc<TaskGroupSearch>>,
}

impl RequiredTasksRule {
    /// Fails when `expectations` is empty.
    pub fn new(metadata: RuleMetadata, expectations: Vec<ExpectedTask>) -> Result<Self, ConfigError> {
        if expectations.is_empty() {
            return Err(ConfigError::InvalidRule {
                rule: metadata.name,
                message: "expected task set must not be empty".to_string(),
            });
        }
        Ok(Self {
            metadata,
            expectations: SmallVec4::from_vec(expectations),
            task_groups: None,
        })
    }

    /// Accept classic pipelines, resolving task groups through `search`.
    pub fn with_task_groups(mut self, search: Arc<TaskGroupSearch>) -> Self {
        self.task_groups = Some(search);
        self
    }

    pub fn expectations(&self) -> &[ExpectedTask] {
        &self.expectations
    }

    fn evaluate_tasks(&self, facts: &TaskContainingEvaluatable) -> EvaluationResult {
        self.expectations
            .iter()
            .all(|expected| facts.tasks.iter().any(|task| expected.matches_task(task)))
            .into()
    }

    fn evaluate_classic(
        &self,
        facts: &ClassicPipelineEvaluatable,
        search: &TaskGroupSearch,
    ) -> Result<EvaluationResult, SearchError> {
        for expected in &self.expectations {
            let found =
                search.contains_task(&facts.organization, &facts.project, &facts.steps, expected)?;
            if !found {
                tracing::debug!(
                    rule = %self.metadata.name,
                    task = %expected.task_id,
                    "required task not found in classic pipeline"
                );
                return Ok(EvaluationResult::fail());
            }
        }
        Ok(EvaluationResult::pass())
    }
}

impl Rule for RequiredTasksRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        match kind {
            FactKind::Tasks => true,
            FactKind::ClassicPipeline => self.task_groups.is_some(),
            _ => false,
        }
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        match (evaluatable, &self.task_groups) {
            (Evaluatable::Tasks(facts), _) => Ok(self.evaluate_tasks(facts)),
            (Evaluatable::ClassicPipeline(facts), Some(search)) => self
                .evaluate_classic(facts, search)
                .map_err(|source| RuleError::EvaluationIncomplete {
                    rule: self.metadata.name.clone(),
                    source,
                }),
            _ => Err(invalid_argument(&self.metadata, evaluatable)),
        }
    }
}
