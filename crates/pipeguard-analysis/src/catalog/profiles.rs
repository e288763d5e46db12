//! Governance profiles and item classification.

use serde::{Deserialize, Serialize};

use pipeguard_core::types::{Evaluatable, PipelineClassification};

use super::standard::names;

/// An immutable named list of rule names for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProfile {
    name: String,
    classification: PipelineClassification,
    rule_names: Vec<String>,
}

impl RuleProfile {
    pub fn new(
        name: impl Into<String>,
        classification: PipelineClassification,
        rule_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            classification,
            rule_names,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classification(&self) -> PipelineClassification {
        self.classification
    }

    pub fn rule_names(&self) -> &[String] {
        &self.rule_names
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.rule_names.iter().any(|n| n == rule)
    }
}

/// One profile per classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSet {
    default: RuleProfile,
    mainframe: RuleProfile,
}

impl ProfileSet {
    pub fn new(default: RuleProfile, mainframe: RuleProfile) -> Self {
        Self { default, mainframe }
    }

    /// The standard baseline: every standard rule by default, and all but the
    /// source scanners for mainframe toolchains.
    pub fn standard() -> Self {
        let default: Vec<String> = names::ALL.iter().map(|n| n.to_string()).collect();
        let mainframe = default
            .iter()
            .filter(|n| !names::SOURCE_SCANNERS.contains(&n.as_str()))
            .cloned()
            .collect();
        Self {
            default: RuleProfile::new("default", PipelineClassification::Default, default),
            mainframe: RuleProfile::new("mainframe", PipelineClassification::Mainframe, mainframe),
        }
    }

    pub fn select(&self, classification: PipelineClassification) -> &RuleProfile {
        match classification {
            PipelineClassification::Default => &self.default,
            PipelineClassification::Mainframe => &self.mainframe,
        }
    }

    pub fn default_profile(&self) -> &RuleProfile {
        &self.default
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleProfile> {
        [&self.default, &self.mainframe].into_iter()
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classification from an item's facts: mainframe iff a materialized task
/// or a classic root step runs one of `markers` (ASCII case-insensitive).
pub fn classify(facts: &[Evaluatable], markers: &[String]) -> PipelineClassification {
    let mut ids = facts.iter().flat_map(task_ids);
    if ids.any(|id| markers.iter().any(|m| m.eq_ignore_ascii_case(id))) {
        PipelineClassification::Mainframe
    } else {
        PipelineClassification::Default
    }
}

fn task_ids(fact: &Evaluatable) -> Box<dyn Iterator<Item = &str> + '_> {
    match fact {
        Evaluatable::Tasks(t) => Box::new(t.tasks.iter().map(|t| t.id.as_str())),
        Evaluatable::ClassicPipeline(c) => Box::new(c.steps.iter().map(|s| s.task_id.as_str())),
        _ => Box::new(std::iter::empty()),
    }
}
