//! Item scanner: runs a profile's rules over one item's facts and aggregates
//! the outcomes into a report.

pub mod orchestrator;
pub mod types;

pub use orchestrator::ComplianceScanner;
pub use types::{ItemReport, RuleOutcome, RuleStatus, ScanItem};
