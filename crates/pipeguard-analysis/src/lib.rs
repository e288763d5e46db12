//! # pipeguard-analysis
//!
//! Compliance rule-evaluation engine:
//! - `rules`: rule trait, all-of/any-of compositions, misuse detector, settings and resource rules
//! - `task_groups`: task-group graph search with a shared step cache
//! - `catalog`: rule registry and classification profiles
//! - `scanner`: per-item evaluation and report aggregation

pub mod catalog;
pub mod rules;
pub mod scanner;
pub mod task_groups;

pub use catalog::{ProfileSet, RuleCatalog, RuleProfile};
pub use rules::{Rule, RuleMetadata};
pub use scanner::{ComplianceScanner, ItemReport, ScanItem};
pub use task_groups::{CachedTaskGroupFetcher, TaskGroupFetcher, TaskGroupSearch};
