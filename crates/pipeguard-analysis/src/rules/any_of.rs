//! Any-of composition: one of several alternative controls must be present.

use std::sync::Arc;

use pipeguard_core::errors::{ConfigError, RuleError};
use pipeguard_core::types::{EvaluationResult, Evaluatable, FactKind};

use super::types::{invalid_argument, Rule, RuleMetadata};

/// Passes iff at least one sub-rule passes on the same fact.
///
/// Sub-rules that do not consume the fact's kind count as not passing;
/// a fact no sub-rule consumes is an invalid argument. An incomplete
/// alternative only makes the composition incomplete when no other
/// alternative passes.
pub struct AnyOfRule {
    metadata: RuleMetadata,
    rules: Vec<Arc<dyn Rule>>,
}

impl AnyOfRule {
    /// Fails when `rules` is empty.
    pub fn new(metadata: RuleMetadata, rules: Vec<Arc<dyn Rule>>) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::InvalidRule {
                rule: metadata.name,
                message: "any-of composition needs at least one sub-rule".to_string(),
            });
        }
        Ok(Self { metadata, rules })
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }
}

impl Rule for AnyOfRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        self.rules.iter().any(|rule| rule.accepts(kind))
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        let kind = evaluatable.kind();
        if !self.accepts(kind) {
            return Err(invalid_argument(&self.metadata, evaluatable));
        }
        let mut incomplete = None;
        for rule in self.rules.iter().filter(|rule| rule.accepts(kind)) {
            match rule.evaluate(evaluatable) {
                Ok(result) if result.passed() => return Ok(EvaluationResult::pass()),
                Ok(_) => {}
                Err(e) if e.is_incomplete() => {
                    tracing::debug!(
                        rule = %self.metadata.name,
                        alternative = rule.name(),
                        error = %e,
                        "alternative incomplete, trying the rest"
                    );
                    incomplete.get_or_insert(e);
                }
                Err(e) => return Err(e),
            }
        }
        match incomplete {
            Some(e) => Err(e),
            None => Ok(EvaluationResult::fail()),
        }
    }
}
