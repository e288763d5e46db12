//! Rules engine: pure functions from a fact snapshot to pass/fail.

pub mod any_of;
pub mod misuse;
pub mod required_tasks;
pub mod resource;
pub mod settings;
pub mod types;

pub use any_of::AnyOfRule;
pub use misuse::{MisuseDetector, MisuseRule};
pub use required_tasks::RequiredTasksRule;
pub use resource::{ResourceCheck, ResourceRule};
pub use settings::{FourEyesApprovalRule, RetentionPolicyRule};
pub use types::{Rule, RuleMetadata};
