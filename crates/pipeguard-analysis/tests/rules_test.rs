//! Rule composition: all-of, any-of, classic pipelines, idempotence.

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use common::FakeFetcher;
use pipeguard_analysis::rules::{AnyOfRule, RequiredTasksRule, Rule, RuleMetadata};
use pipeguard_analysis::task_groups::{TaskGroupFetcher, TaskGroupSearch};
use pipeguard_core::errors::{RuleError, SearchError};
use pipeguard_core::types::{
    BuildStep, ClassicPipelineEvaluatable, Evaluatable, ExpectedTask, FactKind, ItemType,
    PipelineTask, TaskContainingEvaluatable,
};

fn meta(name: &str) -> RuleMetadata {
    RuleMetadata::new(name, ItemType::BuildPipeline)
}

fn all_of(ids: &[&str]) -> RequiredTasksRule {
    RequiredTasksRule::new(
        meta("all-of"),
        ids.iter().map(|id| ExpectedTask::new(*id)).collect(),
    )
    .unwrap()
}

fn tasks(tasks: Vec<PipelineTask>) -> Evaluatable {
    Evaluatable::Tasks(TaskContainingEvaluatable::new(tasks))
}

#[test]
fn cred_scan_alone_fails_until_post_analysis_is_added() {
    let rule = all_of(&["CredScan", "PostAnalysis"]);

    let only_scan = tasks(vec![PipelineTask::new("CredScan")]);
    assert!(!rule.evaluate(&only_scan).unwrap().passed());

    let both = tasks(vec![
        PipelineTask::new("CredScan"),
        PipelineTask::new("PostAnalysis"),
    ]);
    assert!(rule.evaluate(&both).unwrap().passed());
}

#[test]
fn task_ids_match_case_insensitively() {
    let rule = all_of(&["credscan"]);
    assert!(rule
        .evaluate(&tasks(vec![PipelineTask::new("CREDSCAN")]))
        .unwrap()
        .passed());
}

#[test]
fn required_input_values_follow_tri_state_matching() {
    let rule = RequiredTasksRule::new(
        meta("publish-to-server"),
        vec![ExpectedTask::new("publish")
            .with_input("ArtifactType", "Container")
            .values_matter(true)],
    )
    .unwrap();

    let with = |value: Option<&str>| {
        let task = match value {
            Some(v) => PipelineTask::new("publish").with_input("ArtifactType", v),
            None => PipelineTask::new("publish"),
        };
        rule.evaluate(&tasks(vec![task])).unwrap().passed()
    };

    assert!(with(Some("container")));
    assert!(with(Some("")));
    assert!(!with(Some("FilePath")));
    assert!(!with(None));
}

#[test]
fn evaluation_is_idempotent() {
    let rule = all_of(&["a", "b"]);
    let facts = tasks(vec![PipelineTask::new("a"), PipelineTask::new("b").disabled()]);
    let first = rule.evaluate(&facts).unwrap();
    let second = rule.evaluate(&facts).unwrap();
    assert_eq!(first, second);
    assert!(!first.passed());
}

#[test]
fn any_of_passes_when_one_alternative_passes() {
    let rule = AnyOfRule::new(
        meta("artifact-stored"),
        vec![Arc::new(all_of(&["publish-build"])), Arc::new(all_of(&["publish-pipeline"]))],
    )
    .unwrap();

    assert!(rule
        .evaluate(&tasks(vec![PipelineTask::new("publish-pipeline")]))
        .unwrap()
        .passed());
    assert!(!rule
        .evaluate(&tasks(vec![PipelineTask::new("other")]))
        .unwrap()
        .passed());
}

#[test]
fn any_of_with_one_of_three_passing_passes() {
    let rule = AnyOfRule::new(
        meta("one-of-three"),
        vec![
            Arc::new(all_of(&["x"])),
            Arc::new(all_of(&["y"])),
            Arc::new(all_of(&["z"])),
        ],
    )
    .unwrap();
    assert!(rule
        .evaluate(&tasks(vec![PipelineTask::new("y")]))
        .unwrap()
        .passed());
}

#[test]
fn empty_any_of_is_a_configuration_error() {
    assert!(AnyOfRule::new(meta("nothing"), Vec::new()).is_err());
}

#[test]
fn any_of_rejects_facts_no_alternative_consumes() {
    let rule = AnyOfRule::new(meta("artifact-stored"), vec![Arc::new(all_of(&["a"]))]).unwrap();
    let facts = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new("org", "proj", vec![]));
    assert!(matches!(
        rule.evaluate(&facts),
        Err(RuleError::InvalidArgument { found: FactKind::ClassicPipeline, .. })
    ));
}

#[test]
fn classic_pipeline_is_proven_through_task_groups() {
    let fetcher: Arc<dyn TaskGroupFetcher> = Arc::new(
        FakeFetcher::new()
            .with_group("security", vec![BuildStep::task("CredScan")])
            .with_group("reporting", vec![BuildStep::task("PostAnalysis")]),
    );
    let search = Arc::new(TaskGroupSearch::new(fetcher));
    let rule = all_of(&["CredScan", "PostAnalysis"]).with_task_groups(search);
    assert!(rule.accepts(FactKind::ClassicPipeline));

    let partial = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new(
        "org",
        "proj",
        vec![BuildStep::task_group("security")],
    ));
    assert!(!rule.evaluate(&partial).unwrap().passed());

    let complete = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new(
        "org",
        "proj",
        vec![BuildStep::task_group("security"), BuildStep::task_group("reporting")],
    ));
    assert!(rule.evaluate(&complete).unwrap().passed());
}

#[test]
fn classic_fetch_failure_is_incomplete_not_failed() {
    let fetcher: Arc<dyn TaskGroupFetcher> = Arc::new(FakeFetcher::new().failing("security"));
    let rule = all_of(&["CredScan"]).with_task_groups(Arc::new(TaskGroupSearch::new(fetcher)));
    let facts = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new(
        "org",
        "proj",
        vec![BuildStep::task_group("security")],
    ));

    let err = rule.evaluate(&facts).unwrap_err();
    assert!(err.is_incomplete());
    assert!(matches!(
        err,
        RuleError::EvaluationIncomplete { source: SearchError::Fetch(_), .. }
    ));
}

#[test]
fn any_of_passes_past_an_incomplete_alternative() {
    let fetcher: Arc<dyn TaskGroupFetcher> = Arc::new(FakeFetcher::new().failing("g"));
    let search = Arc::new(TaskGroupSearch::new(fetcher));
    let rule = AnyOfRule::new(
        meta("artifact-stored"),
        vec![
            Arc::new(all_of(&["publish-build"]).with_task_groups(search.clone())),
            Arc::new(all_of(&["publish-pipeline"]).with_task_groups(search)),
        ],
    )
    .unwrap();

    let facts = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new(
        "org",
        "proj",
        vec![BuildStep::task("publish-pipeline"), BuildStep::task_group("g")],
    ));
    assert!(rule.evaluate(&facts).unwrap().passed());
}

#[test]
fn any_of_is_incomplete_when_no_alternative_passes() {
    let fetcher: Arc<dyn TaskGroupFetcher> = Arc::new(FakeFetcher::new().failing("g"));
    let search = Arc::new(TaskGroupSearch::new(fetcher));
    let rule = AnyOfRule::new(
        meta("artifact-stored"),
        vec![
            Arc::new(all_of(&["publish-build"]).with_task_groups(search.clone())),
            Arc::new(all_of(&["publish-pipeline"]).with_task_groups(search)),
        ],
    )
    .unwrap();

    let facts = Evaluatable::ClassicPipeline(ClassicPipelineEvaluatable::new(
        "org",
        "proj",
        vec![BuildStep::task("build"), BuildStep::task_group("g")],
    ));
    assert!(rule.evaluate(&facts).unwrap_err().is_incomplete());
}

fn task_strategy() -> impl Strategy<Value = (usize, bool)> {
    (0usize..4, any::<bool>())
}

const IDS: [&str; 4] = ["a", "b", "c", "d"];

proptest! {
    #[test]
    fn all_of_passes_iff_every_expectation_has_an_enabled_task(
        present in prop::collection::vec(task_strategy(), 0..8),
        expected in prop::collection::btree_set(0usize..4, 1..4),
    ) {
        let expected_ids: Vec<&str> = expected.iter().map(|&i| IDS[i]).collect();
        let rule = all_of(&expected_ids);
        let facts = tasks(
            present
                .iter()
                .map(|&(i, enabled)| {
                    let task = PipelineTask::new(IDS[i]);
                    if enabled { task } else { task.disabled() }
                })
                .collect(),
        );

        let oracle = expected
            .iter()
            .all(|&e| present.iter().any(|&(i, enabled)| i == e && enabled));
        prop_assert_eq!(rule.evaluate(&facts).unwrap().passed(), oracle);
    }

    #[test]
    fn removing_a_required_task_flips_a_pass(
        expected in prop::collection::btree_set(0usize..4, 1..4),
        pick in any::<prop::sample::Index>(),
    ) {
        let expected_ids: Vec<&str> = expected.iter().map(|&i| IDS[i]).collect();
        let rule = all_of(&expected_ids);
        let mut present: Vec<PipelineTask> =
            expected_ids.iter().map(|id| PipelineTask::new(*id)).collect();
        prop_assert!(rule.evaluate(&tasks(present.clone())).unwrap().passed());

        present.remove(pick.index(present.len()));
        prop_assert!(!rule.evaluate(&tasks(present)).unwrap().passed());
    }

    #[test]
    fn any_of_passes_iff_some_alternative_passes(
        present in prop::collection::vec(0usize..4, 0..6),
        alternatives in prop::collection::vec(0usize..4, 1..4),
    ) {
        let subs: Vec<Arc<dyn Rule>> = alternatives
            .iter()
            .map(|&i| Arc::new(all_of(&[IDS[i]])) as Arc<dyn Rule>)
            .collect();
        let rule = AnyOfRule::new(meta("any"), subs.clone()).unwrap();
        let facts = tasks(present.iter().map(|&i| PipelineTask::new(IDS[i])).collect());

        let oracle = subs.iter().any(|s| s.evaluate(&facts).unwrap().passed());
        prop_assert_eq!(rule.evaluate(&facts).unwrap().passed(), oracle);
    }
}
