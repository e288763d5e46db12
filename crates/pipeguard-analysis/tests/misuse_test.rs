//! Misuse detection over nested and cyclic group membership.

use pipeguard_analysis::rules::{MisuseDetector, MisuseRule, Rule, RuleMetadata};
use pipeguard_core::errors::RuleError;
use pipeguard_core::types::{
    Evaluatable, Group, GroupDirectory, Identity, ItemType, MisuseKind, PermissionEvaluatable,
    PipelineMisuse, ProjectMisuse, RepositoryMisuse, SettingsEvaluatable,
};

fn pipeline_rule() -> MisuseRule<PipelineMisuse> {
    MisuseRule::new(
        RuleMetadata::new("nobody-can-delete-builds", ItemType::BuildPipeline),
        vec![
            PipelineMisuse::DeletePipeline,
            PipelineMisuse::DeleteRuns,
            PipelineMisuse::ManagePermissions,
        ],
    )
    .unwrap()
}

fn pipeline_facts(permissions: PermissionEvaluatable<PipelineMisuse>) -> Evaluatable {
    Evaluatable::PipelinePermissions(permissions)
}

#[test]
fn user_granted_delete_fails() {
    let facts = pipeline_facts(
        PermissionEvaluatable::new().grant(PipelineMisuse::DeletePipeline, vec![Identity::user("user-a")]),
    );
    assert!(!pipeline_rule().evaluate(&facts).unwrap().passed());
}

#[test]
fn empty_grants_pass() {
    let facts = pipeline_facts(PermissionEvaluatable::new());
    assert!(pipeline_rule().evaluate(&facts).unwrap().passed());
}

#[test]
fn every_kind_is_safe_by_absence() {
    let permissions = PermissionEvaluatable::<RepositoryMisuse>::new();
    let detector = MisuseDetector::new(&permissions);
    assert!(RepositoryMisuse::all().iter().all(|&kind| detector.is_safe(kind)));
    assert!(detector.find_offender(RepositoryMisuse::all()).is_none());
}

#[test]
fn grant_with_no_identities_is_safe() {
    let facts = pipeline_facts(PermissionEvaluatable::new().grant(PipelineMisuse::DeleteRuns, vec![]));
    assert!(pipeline_rule().evaluate(&facts).unwrap().passed());
}

#[test]
fn mutually_nested_groups_without_users_pass() {
    let directory = GroupDirectory::new()
        .with_group("group-x", vec![Identity::group("group-y")])
        .with_group("group-y", vec![Identity::group("group-x")]);
    let facts = pipeline_facts(
        PermissionEvaluatable::new()
            .grant(PipelineMisuse::DeletePipeline, vec![Identity::group("group-x")])
            .with_directory(directory),
    );
    assert!(pipeline_rule().evaluate(&facts).unwrap().passed());
}

#[test]
fn cycle_with_a_user_behind_it_fails() {
    let directory = GroupDirectory::new()
        .with_group("group-x", vec![Identity::group("group-y")])
        .with_group("group-y", vec![Identity::group("group-x"), Identity::group("group-z")])
        .with_group("group-z", vec![Identity::user("mallory")]);
    let permissions = PermissionEvaluatable::new()
        .grant(PipelineMisuse::ManagePermissions, vec![Identity::group("group-x")])
        .with_directory(directory);

    let detector = MisuseDetector::new(&permissions);
    let (kind, user) = detector
        .find_offender(&[PipelineMisuse::DeletePipeline, PipelineMisuse::ManagePermissions])
        .unwrap();
    assert_eq!(kind, PipelineMisuse::ManagePermissions);
    assert_eq!(user.id, "mallory");
    assert!(!pipeline_rule().evaluate(&pipeline_facts(permissions)).unwrap().passed());
}

#[test]
fn inline_members_are_expanded() {
    let facts = Evaluatable::ProjectPermissions(PermissionEvaluatable::new().grant(
        ProjectMisuse::DeleteProject,
        vec![Identity::Group(
            Group::new("project-admins").with_members(vec![Identity::user("alice")]),
        )],
    ));
    let rule = MisuseRule::new(
        RuleMetadata::new("nobody-can-delete-the-project", ItemType::Project),
        vec![ProjectMisuse::DeleteProject],
    )
    .unwrap();
    assert!(!rule.evaluate(&facts).unwrap().passed());
}

#[test]
fn kinds_outside_the_rule_are_ignored() {
    let facts = Evaluatable::RepositoryPermissions(PermissionEvaluatable::new().grant(
        RepositoryMisuse::BypassPoliciesWhenPushing,
        vec![Identity::user("alice")],
    ));
    let rule = MisuseRule::new(
        RuleMetadata::new("nobody-can-delete-the-repository", ItemType::Repository),
        vec![RepositoryMisuse::DeleteRepository, RepositoryMisuse::ManagePermissions],
    )
    .unwrap();
    assert!(rule.evaluate(&facts).unwrap().passed());
}

#[test]
fn wrong_permission_kind_is_invalid_argument() {
    let repository = Evaluatable::RepositoryPermissions(PermissionEvaluatable::new());
    assert!(matches!(
        pipeline_rule().evaluate(&repository),
        Err(RuleError::InvalidArgument { .. })
    ));
    let settings = Evaluatable::Settings(SettingsEvaluatable::new());
    assert!(pipeline_rule().evaluate(&settings).is_err());
}

#[test]
fn empty_kind_set_is_a_configuration_error() {
    let rule = MisuseRule::<PipelineMisuse>::new(
        RuleMetadata::new("nothing", ItemType::BuildPipeline),
        Vec::new(),
    );
    assert!(rule.is_err());
}

#[test]
fn grants_deserialize_from_supplier_json() {
    let json = r#"{
        "kind": "pipeline-permissions",
        "facts": {
            "grants": {
                "delete-runs": [
                    { "type": "group", "id": "release-managers" }
                ]
            },
            "directory": {
                "release-managers": [ { "type": "user", "id": "carol" } ]
            }
        }
    }"#;
    let facts: Evaluatable = serde_json::from_str(json).unwrap();
    assert!(!pipeline_rule().evaluate(&facts).unwrap().passed());
}
