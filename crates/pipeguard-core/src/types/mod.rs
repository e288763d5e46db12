//! The fact model: typed snapshots of a pipeline, repository or project.
//!
//! Everything here is plain data produced by an external fact supplier and
//! consumed, read-only, by the rules in `pipeguard-analysis`.

pub mod collections;
pub mod evaluatable;
pub mod identifiers;
pub mod identity;
pub mod item;
pub mod misuse;
pub mod pipeline;
pub mod result;
pub mod tasks;

pub use collections::{FxHashMap, FxHashSet, SmallVec4};
pub use evaluatable::{
    ClassicPipelineEvaluatable, Evaluatable, FactKind, PermissionEvaluatable, ProcessType,
    ResourceEvaluatable, SettingValue, SettingsEvaluatable, TaskContainingEvaluatable,
};
pub use identifiers::{GroupId, TaskGroupId};
pub use identity::{Group, GroupDirectory, Identity, User};
pub use item::{ItemType, PipelineClassification};
pub use misuse::{MisuseKind, PipelineMisuse, ProjectMisuse, RepositoryMisuse};
pub use pipeline::{PipelineDefinition, PipelineRef};
pub use result::EvaluationResult;
pub use tasks::{BuildStep, ExpectedTask, PipelineTask, StepKind};
