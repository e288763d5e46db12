//! The standard governance rule set.

use std::sync::Arc;

use pipeguard_core::config::RulesConfig;
use pipeguard_core::constants::{
    TASK_CRED_SCAN, TASK_FORTIFY_SCA, TASK_POST_ANALYSIS, TASK_PUBLISH_BUILD_ARTIFACTS,
    TASK_PUBLISH_PIPELINE_ARTIFACT, TASK_SONARQUBE_ANALYZE, TASK_SONARQUBE_PREPARE,
};
use pipeguard_core::errors::CatalogError;
use pipeguard_core::types::{
    ExpectedTask, ItemType, PipelineMisuse, ProjectMisuse, RepositoryMisuse,
};

use super::registry::RuleCatalog;
use crate::rules::{
    AnyOfRule, FourEyesApprovalRule, MisuseRule, RequiredTasksRule, ResourceCheck, ResourceRule,
    RetentionPolicyRule, Rule, RuleMetadata,
};
use crate::task_groups::TaskGroupSearch;

/// Names of the standard rules.
pub mod names {
    pub const BUILD_HAS_CRED_SCAN: &str = "build-pipeline-has-cred-scan-task";
    pub const BUILD_HAS_SONARQUBE: &str = "build-pipeline-has-sonarqube-task";
    pub const BUILD_HAS_FORTIFY: &str = "build-pipeline-has-fortify-task";
    pub const BUILD_ARTIFACT_STORED_SECURE: &str = "build-artifact-is-stored-secure";
    pub const NOBODY_CAN_DELETE_BUILDS: &str = "nobody-can-delete-builds";
    pub const NOBODY_CAN_DELETE_RELEASES: &str = "nobody-can-delete-releases";
    pub const RELEASE_HAS_FOUR_EYES: &str = "release-pipeline-has-four-eyes-approval";
    pub const RELEASE_HAS_RETENTION: &str = "release-pipeline-has-required-retention-policy";
    pub const RELEASE_USES_BUILD_ARTIFACT: &str = "release-pipeline-uses-build-artifact";
    pub const PRODUCTION_ARTIFACT_FROM_SECURE_BRANCH: &str =
        "production-stage-uses-artifact-from-secure-branch";
    pub const NOBODY_CAN_DELETE_REPOSITORY: &str = "nobody-can-delete-the-repository";
    pub const NOBODY_CAN_BYPASS_POLICIES: &str = "nobody-can-bypass-policies";
    pub const NOBODY_CAN_DELETE_PROJECT: &str = "nobody-can-delete-the-project";

    /// Every standard rule, in report order.
    pub const ALL: &[&str] = &[
        BUILD_HAS_CRED_SCAN,
        BUILD_HAS_SONARQUBE,
        BUILD_HAS_FORTIFY,
        BUILD_ARTIFACT_STORED_SECURE,
        NOBODY_CAN_DELETE_BUILDS,
        NOBODY_CAN_DELETE_RELEASES,
        RELEASE_HAS_FOUR_EYES,
        RELEASE_HAS_RETENTION,
        RELEASE_USES_BUILD_ARTIFACT,
        PRODUCTION_ARTIFACT_FROM_SECURE_BRANCH,
        NOBODY_CAN_DELETE_REPOSITORY,
        NOBODY_CAN_BYPASS_POLICIES,
        NOBODY_CAN_DELETE_PROJECT,
    ];

    /// Source scanners that cannot analyse mainframe sources.
    pub const SOURCE_SCANNERS: &[&str] = &[BUILD_HAS_SONARQUBE, BUILD_HAS_FORTIFY];
}

impl RuleCatalog {
    /// Build the standard rule set.
    ///
    /// With `task_groups`, required-task rules also evaluate classic pipelines
    /// by searching their task-group expansion.
    pub fn standard(
        config: &RulesConfig,
        task_groups: Option<Arc<TaskGroupSearch>>,
    ) -> Result<Self, CatalogError> {
        let required = |metadata: RuleMetadata,
                        expectations: Vec<ExpectedTask>|
         -> Result<RequiredTasksRule, CatalogError> {
            let rule = RequiredTasksRule::new(metadata, expectations)?;
            Ok(match &task_groups {
                Some(search) => rule.with_task_groups(Arc::clone(search)),
                None => rule,
            })
        };

        let build = ItemType::BuildPipeline;
        let release = ItemType::ReleasePipeline;

        let secure_storage: Vec<Arc<dyn Rule>> = vec![
            Arc::new(required(
                RuleMetadata::new("publish-build-artifacts-to-server", build),
                vec![ExpectedTask::new(TASK_PUBLISH_BUILD_ARTIFACTS)
                    .with_input("ArtifactType", "Container")
                    .values_matter(true)],
            )?),
            Arc::new(required(
                RuleMetadata::new("publish-pipeline-artifact", build),
                vec![ExpectedTask::new(TASK_PUBLISH_PIPELINE_ARTIFACT)],
            )?),
        ];

        let rules: Vec<Arc<dyn Rule>> = vec![
            Arc::new(required(
                RuleMetadata::new(names::BUILD_HAS_CRED_SCAN, build)
                    .description("Build pipeline contains an enabled credential scan task")
                    .why("Secrets committed to source control must be detected before they spread"),
                vec![ExpectedTask::new(TASK_CRED_SCAN), ExpectedTask::new(TASK_POST_ANALYSIS)],
            )?),
            Arc::new(required(
                RuleMetadata::new(names::BUILD_HAS_SONARQUBE, build)
                    .description("Build pipeline contains an enabled SonarQube analysis")
                    .why("Code quality must be measured on every change"),
                vec![
                    ExpectedTask::new(TASK_SONARQUBE_PREPARE),
                    ExpectedTask::new(TASK_SONARQUBE_ANALYZE),
                ],
            )?),
            Arc::new(required(
                RuleMetadata::new(names::BUILD_HAS_FORTIFY, build)
                    .description("Build pipeline contains an enabled Fortify scan task")
                    .why("Security vulnerabilities must be found before release"),
                vec![ExpectedTask::new(TASK_FORTIFY_SCA)],
            )?),
            Arc::new(AnyOfRule::new(
                RuleMetadata::new(names::BUILD_ARTIFACT_STORED_SECURE, build)
                    .description("Build artifacts are published to secure storage")
                    .why("Artifacts must not be altered between build and deployment"),
                secure_storage,
            )?),
            Arc::new(MisuseRule::new(
                RuleMetadata::new(names::NOBODY_CAN_DELETE_BUILDS, build)
                    .description("Nobody can delete the build pipeline or its runs")
                    .why("Build history must remain available as an audit trail"),
                vec![
                    PipelineMisuse::DeletePipeline,
                    PipelineMisuse::DeleteRuns,
                    PipelineMisuse::ManagePermissions,
                ],
            )?),
            Arc::new(MisuseRule::new(
                RuleMetadata::new(names::NOBODY_CAN_DELETE_RELEASES, release)
                    .description("Nobody can delete the release pipeline or its releases")
                    .why("Deployments to production must remain traceable"),
                vec![
                    PipelineMisuse::DeletePipeline,
                    PipelineMisuse::DeleteRuns,
                    PipelineMisuse::ManagePermissions,
                ],
            )?),
            Arc::new(FourEyesApprovalRule::new(
                RuleMetadata::new(names::RELEASE_HAS_FOUR_EYES, release)
                    .description("Production deployments require approval by someone other than the creator")
                    .why("No single person can bring a change to production alone"),
                config.effective_min_approvers(),
            )),
            Arc::new(RetentionPolicyRule::new(
                RuleMetadata::new(names::RELEASE_HAS_RETENTION, release)
                    .description("Release runs are retained for the required period")
                    .why("Deployment evidence must outlive the audit window"),
                config.effective_min_retention_days(),
            )),
            Arc::new(ResourceRule::new(
                RuleMetadata::new(names::RELEASE_USES_BUILD_ARTIFACT, release)
                    .description("Release pipeline deploys a build artifact")
                    .why("What is deployed must be produced by a controlled build"),
                ResourceCheck::UsesBuildArtifact,
            )),
            Arc::new(ResourceRule::new(
                RuleMetadata::new(names::PRODUCTION_ARTIFACT_FROM_SECURE_BRANCH, release)
                    .description("Production stage deploys an artifact built from a protected branch")
                    .why("Only reviewed code may reach production"),
                ResourceCheck::ArtifactFromSecureBranch,
            )),
            Arc::new(MisuseRule::new(
                RuleMetadata::new(names::NOBODY_CAN_DELETE_REPOSITORY, ItemType::Repository)
                    .description("Nobody can delete the repository")
                    .why("Source history must remain available as an audit trail"),
                vec![
                    RepositoryMisuse::DeleteRepository,
                    RepositoryMisuse::ManagePermissions,
                ],
            )?),
            Arc::new(MisuseRule::new(
                RuleMetadata::new(names::NOBODY_CAN_BYPASS_POLICIES, ItemType::Repository)
                    .description("Nobody can bypass branch policies")
                    .why("Every change to a protected branch must be reviewed"),
                vec![
                    RepositoryMisuse::BypassPoliciesWhenPushing,
                    RepositoryMisuse::BypassPoliciesWhenCompletingPullRequests,
                ],
            )?),
            Arc::new(MisuseRule::new(
                RuleMetadata::new(names::NOBODY_CAN_DELETE_PROJECT, ItemType::Project)
                    .description("Nobody can delete the project")
                    .why("Project history must remain available as an audit trail"),
                vec![ProjectMisuse::DeleteProject, ProjectMisuse::ManagePermissions],
            )?),
        ];

        let catalog = Self::with_rules(rules)?;
        tracing::info!(
            rules = catalog.len(),
            task_groups = task_groups.is_some(),
            "standard rule catalog built"
        );
        Ok(catalog)
    }
}
