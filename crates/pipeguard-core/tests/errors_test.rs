//! Error code and conversion tests.

use pipeguard_core::errors::{
    CatalogError, ConfigError, FetchError, PipeguardErrorCode, RuleError, SearchError,
};
use pipeguard_core::types::FactKind;

#[test]
fn fetch_failure_surfaces_as_incomplete_evaluation() {
    let fetch = FetchError::Failed {
        key: "org/proj/taskgroups/a".to_string(),
        message: "503".to_string(),
    };
    let search: SearchError = fetch.clone().into();
    assert_eq!(search.error_code(), "FETCH_FAILED");

    let rule = RuleError::EvaluationIncomplete {
        rule: "has-cred-scan".to_string(),
        source: search,
    };
    assert!(rule.is_incomplete());
    assert_eq!(rule.error_code(), "EVALUATION_INCOMPLETE");
    assert!(rule.to_string().contains("org/proj/taskgroups/a"));
    assert_eq!(fetch.key(), "org/proj/taskgroups/a");
}

#[test]
fn invalid_argument_is_a_defect_not_incomplete() {
    let err = RuleError::InvalidArgument {
        rule: "nobody-can-delete-builds".to_string(),
        found: FactKind::Settings,
    };
    assert!(!err.is_incomplete());
    assert_eq!(
        err.coded_string(),
        "[INVALID_ARGUMENT] Rule nobody-can-delete-builds cannot evaluate settings facts"
    );
}

#[test]
fn catalog_error_forwards_rule_config_code() {
    let err: CatalogError = ConfigError::InvalidRule {
        rule: "empty".to_string(),
        message: "expected task set must not be empty".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "INVALID_RULE_CONFIG");

    let err = CatalogError::UnreachableRule {
        rule: "orphan".to_string(),
    };
    assert_eq!(err.error_code(), "CATALOG_ERROR");
}

#[test]
fn cancellation_has_its_own_code() {
    let err = SearchError::Cancelled { layers: 2 };
    assert_eq!(err.error_code(), "CANCELLED");
    assert_eq!(err.to_string(), "Search cancelled after 2 layer(s)");
}
