//! Outcome of one rule applied to one fact snapshot.

use serde::{Deserialize, Serialize};

/// Pass/fail outcome of a single rule evaluation.
///
/// Built fresh per evaluation and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationResult {
    passed: bool,
}

impl EvaluationResult {
    pub fn new(passed: bool) -> Self {
        Self { passed }
    }

    pub fn pass() -> Self {
        Self::new(true)
    }

    pub fn fail() -> Self {
        Self::new(false)
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl From<bool> for EvaluationResult {
    fn from(passed: bool) -> Self {
        Self::new(passed)
    }
}
