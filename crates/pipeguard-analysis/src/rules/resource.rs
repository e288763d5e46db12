//! Rules over process-type and artifact-usage flags.

use serde::{Deserialize, Serialize};

use pipeguard_core::errors::RuleError;
use pipeguard_core::types::{EvaluationResult, Evaluatable, FactKind, ResourceEvaluatable};

use super::types::{invalid_argument, Rule, RuleMetadata};

/// Which resource flag a `ResourceRule` requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCheck {
    /// Deploys consume an artifact produced by a build pipeline.
    UsesBuildArtifact,
    /// The deployed artifact was built from a protected branch.
    ArtifactFromSecureBranch,
}

impl ResourceCheck {
    fn holds(&self, resource: &ResourceEvaluatable) -> bool {
        match self {
            Self::UsesBuildArtifact => resource.uses_build_artifact,
            Self::ArtifactFromSecureBranch => {
                resource.uses_build_artifact && resource.artifact_from_secure_branch
            }
        }
    }
}

pub struct ResourceRule {
    metadata: RuleMetadata,
    check: ResourceCheck,
}

impl ResourceRule {
    pub fn new(metadata: RuleMetadata, check: ResourceCheck) -> Self {
        Self { metadata, check }
    }
}

impl Rule for ResourceRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        kind == FactKind::Resource
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        match evaluatable {
            Evaluatable::Resource(resource) => Ok(self.check.holds(resource).into()),
            other => Err(invalid_argument(&self.metadata, other)),
        }
    }
}
