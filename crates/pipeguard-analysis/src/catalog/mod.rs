//! Rule catalog and governance profiles.
//!
//! The catalog is built once at startup and shared read-only. Profiles are
//! plain name lists; `RuleCatalog::validate` proves every name resolves and
//! every registered rule is reachable from the default profile.

pub mod profiles;
pub mod registry;
pub mod standard;

pub use profiles::{classify, ProfileSet, RuleProfile};
pub use registry::RuleCatalog;
pub use standard::names;
