//! Classification of scanned items.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of item a rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    BuildPipeline,
    ReleasePipeline,
    Repository,
    Project,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildPipeline => "build-pipeline",
            Self::ReleasePipeline => "release-pipeline",
            Self::Repository => "repository",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which governance baseline applies to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineClassification {
    /// Standard toolchains.
    #[default]
    Default,
    /// Mainframe (COBOL) toolchains, which source scanners cannot analyse.
    Mainframe,
}

impl PipelineClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Mainframe => "mainframe",
        }
    }
}

impl fmt::Display for PipelineClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
