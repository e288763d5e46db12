//! Scan inputs and reports.

use serde::{Deserialize, Serialize};

use pipeguard_core::types::{Evaluatable, ItemType, PipelineClassification};

use crate::rules::RuleMetadata;

/// One item to scan, with every fact snapshot the supplier produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanItem {
    pub id: String,
    pub item_type: ItemType,
    /// Explicit classification; derived from the facts when absent.
    #[serde(default)]
    pub classification: Option<PipelineClassification>,
    pub facts: Vec<Evaluatable>,
}

impl ScanItem {
    pub fn new(id: impl Into<String>, item_type: ItemType, facts: Vec<Evaluatable>) -> Self {
        Self {
            id: id.into(),
            item_type,
            classification: None,
            facts,
        }
    }

    pub fn classified(mut self, classification: PipelineClassification) -> Self {
        self.classification = Some(classification);
        self
    }
}

/// Rule outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Passed,
    Failed,
    /// The rule could not determine its answer (fetch failure, cancellation).
    Incomplete,
}

/// Result of one rule on one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: RuleMetadata,
    pub status: RuleStatus,
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

impl RuleOutcome {
    pub fn passed(&self) -> bool {
        self.status == RuleStatus::Passed
    }
}

/// Aggregated outcomes of one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub item_id: String,
    pub item_type: ItemType,
    pub profile: String,
    pub outcomes: Vec<RuleOutcome>,
    /// Every outcome passed.
    pub compliant: bool,
    /// At least one outcome is incomplete; the item must be rescanned.
    pub scan_failed: bool,
}

impl ItemReport {
    pub(crate) fn new(item: &ScanItem, profile: &str, outcomes: Vec<RuleOutcome>) -> Self {
        let compliant = outcomes.iter().all(RuleOutcome::passed);
        let scan_failed = outcomes.iter().any(|o| o.status == RuleStatus::Incomplete);
        Self {
            item_id: item.id.clone(),
            item_type: item.item_type,
            profile: profile.to_string(),
            outcomes,
            compliant,
            scan_failed,
        }
    }

    /// Outcomes that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.status == RuleStatus::Failed)
    }

    pub fn outcome(&self, rule: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule.name == rule)
    }
}
