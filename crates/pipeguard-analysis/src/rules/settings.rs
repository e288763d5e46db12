//! Rules over named resource settings.

use pipeguard_core::constants::{
    SETTING_APPROVALS_REQUIRED, SETTING_CREATOR_CAN_APPROVE, SETTING_MIN_APPROVERS,
    SETTING_RETENTION_DAYS,
};
use pipeguard_core::errors::RuleError;
use pipeguard_core::types::{EvaluationResult, Evaluatable, FactKind, SettingsEvaluatable};

use super::types::{invalid_argument, Rule, RuleMetadata};

fn settings<'a>(
    metadata: &RuleMetadata,
    evaluatable: &'a Evaluatable,
) -> Result<&'a SettingsEvaluatable, RuleError> {
    match evaluatable {
        Evaluatable::Settings(settings) => Ok(settings),
        other => Err(invalid_argument(metadata, other)),
    }
}

/// Runs must be retained for at least `min_days`. A missing setting fails.
pub struct RetentionPolicyRule {
    metadata: RuleMetadata,
    min_days: i64,
}

impl RetentionPolicyRule {
    pub fn new(metadata: RuleMetadata, min_days: i64) -> Self {
        Self { metadata, min_days }
    }

    pub fn min_days(&self) -> i64 {
        self.min_days
    }
}

impl Rule for RetentionPolicyRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        kind == FactKind::Settings
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        let settings = settings(&self.metadata, evaluatable)?;
        Ok(settings
            .integer(SETTING_RETENTION_DAYS)
            .is_some_and(|days| days >= self.min_days)
            .into())
    }
}

/// Production deploys need approval by someone other than the requester.
///
/// Approvals must be switched on, require at least `min_approvers`, and
/// explicitly forbid the creator from approving their own run.
pub struct FourEyesApprovalRule {
    metadata: RuleMetadata,
    min_approvers: i64,
}

impl FourEyesApprovalRule {
    pub fn new(metadata: RuleMetadata, min_approvers: i64) -> Self {
        Self {
            metadata,
            min_approvers,
        }
    }
}

impl Rule for FourEyesApprovalRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        kind == FactKind::Settings
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        let settings = settings(&self.metadata, evaluatable)?;
        let required = settings.boolean(SETTING_APPROVALS_REQUIRED) == Some(true);
        let enough = settings
            .integer(SETTING_MIN_APPROVERS)
            .is_some_and(|n| n >= self.min_approvers);
        let creator_excluded = settings.boolean(SETTING_CREATOR_CAN_APPROVE) == Some(false);
        Ok((required && enough && creator_excluded).into())
    }
}
