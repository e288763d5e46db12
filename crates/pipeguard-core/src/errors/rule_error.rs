//! Rule evaluation errors.

use super::error_code::{self, PipeguardErrorCode};
use super::SearchError;
use crate::types::FactKind;

/// Errors that can occur while evaluating a rule.
///
/// A rule that evaluates to `passed = false` is not an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleError {
    /// The rule was handed a fact snapshot it does not consume.
    #[error("Rule {rule} cannot evaluate {found} facts")]
    InvalidArgument { rule: String, found: FactKind },

    /// The scanned item carries no fact snapshot the rule consumes.
    #[error("Rule {rule} found no applicable facts on item {item}")]
    MissingFacts { rule: String, item: String },

    /// The answer could not be determined (fetch failure, cancellation).
    #[error("Rule {rule} could not complete: {source}")]
    EvaluationIncomplete {
        rule: String,
        #[source]
        source: SearchError,
    },
}

impl RuleError {
    /// Whether this error marks an incomplete scan rather than a defect.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::EvaluationIncomplete { .. })
    }
}

impl PipeguardErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::MissingFacts { .. } => error_code::MISSING_FACTS,
            Self::EvaluationIncomplete { .. } => error_code::EVALUATION_INCOMPLETE,
        }
    }
}
