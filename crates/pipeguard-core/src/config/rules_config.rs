//! Rule thresholds and profile classification settings.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAINFRAME_TASK_IDS, DEFAULT_MIN_APPROVERS, DEFAULT_MIN_RETENTION_DAYS,
};

/// Configuration for the rule catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Minimum retention of pipeline runs in days. Default: 450.
    pub min_retention_days: Option<i64>,
    /// Minimum approvers on a production stage. Default: 1.
    pub min_approvers: Option<i64>,
    /// Task ids that classify a pipeline as mainframe. Default: built-in list.
    #[serde(default)]
    pub mainframe_task_ids: Vec<String>,
}

impl RulesConfig {
    pub fn effective_min_retention_days(&self) -> i64 {
        self.min_retention_days.unwrap_or(DEFAULT_MIN_RETENTION_DAYS)
    }

    pub fn effective_min_approvers(&self) -> i64 {
        self.min_approvers.unwrap_or(DEFAULT_MIN_APPROVERS)
    }

    /// Returns the configured mainframe marker task ids, or the built-in list.
    pub fn effective_mainframe_task_ids(&self) -> Vec<String> {
        if self.mainframe_task_ids.is_empty() {
            DEFAULT_MAINFRAME_TASK_IDS
                .iter()
                .map(|id| id.to_string())
                .collect()
        } else {
            self.mainframe_task_ids.clone()
        }
    }
}
