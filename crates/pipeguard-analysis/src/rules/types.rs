//! Core types for the rules engine.

use serde::{Deserialize, Serialize};

use pipeguard_core::errors::RuleError;
use pipeguard_core::types::{EvaluationResult, Evaluatable, FactKind, ItemType};

/// Descriptive data handed to the report consumer with every outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub name: String,
    pub item_type: ItemType,
    pub description: String,
    /// The governance principle the rule enforces.
    pub why: String,
    pub link: Option<String>,
}

impl RuleMetadata {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            description: String::new(),
            why: String::new(),
            link: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn why(mut self, why: impl Into<String>) -> Self {
        self.why = why.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// A compliance rule.
///
/// `evaluate` returns `Ok` for both outcomes; `passed = false` is an answer,
/// not a failure. Errors are reserved for facts the rule cannot consume and
/// for evaluations that could not complete.
pub trait Rule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Whether the rule consumes facts of this kind.
    fn accepts(&self, kind: FactKind) -> bool;

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError>;
}

/// The error for an evaluatable of a kind `rule` does not consume.
pub(crate) fn invalid_argument(metadata: &RuleMetadata, evaluatable: &Evaluatable) -> RuleError {
    RuleError::InvalidArgument {
        rule: metadata.name.clone(),
        found: evaluatable.kind(),
    }
}
