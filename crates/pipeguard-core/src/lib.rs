//! # pipeguard-core
//!
//! Foundation crate for the Pipeguard compliance engine.
//! Defines the fact model, errors, config, tracing, and constants.
//! `pipeguard-analysis` builds the rules and graph searches on top of it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::PipeguardConfig;
pub use errors::{
    CatalogError, ConfigError, FetchError, PipeguardErrorCode, RuleError, SearchError,
};
pub use traits::{Cancellable, CancellationToken};
pub use types::{
    BuildStep, EvaluationResult, Evaluatable, ExpectedTask, FactKind, Identity,
    PermissionEvaluatable, PipelineTask,
};
