//! Compliance scanner: profile selection and rule execution per item.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use pipeguard_core::config::RulesConfig;
use pipeguard_core::errors::{CatalogError, RuleError};
use pipeguard_core::types::PipelineClassification;

use super::types::{ItemReport, RuleOutcome, RuleStatus, ScanItem};
use crate::catalog::{classify, ProfileSet, RuleCatalog};
use crate::rules::Rule;

/// Runs the applicable profile's rules against scanned items.
pub struct ComplianceScanner {
    catalog: Arc<RuleCatalog>,
    profiles: ProfileSet,
    default_rules: Vec<Arc<dyn Rule>>,
    mainframe_rules: Vec<Arc<dyn Rule>>,
    mainframe_markers: Vec<String>,
}

impl ComplianceScanner {
    /// Scanner using the default mainframe markers.
    pub fn new(catalog: Arc<RuleCatalog>, profiles: ProfileSet) -> Result<Self, CatalogError> {
        Self::from_config(catalog, profiles, &RulesConfig::default())
    }

    /// Fails when the catalog and profiles are not referentially complete.
    /// Mainframe markers come from `config`.
    pub fn from_config(
        catalog: Arc<RuleCatalog>,
        profiles: ProfileSet,
        config: &RulesConfig,
    ) -> Result<Self, CatalogError> {
        catalog.validate(&profiles)?;
        let default_rules = catalog.resolve(profiles.select(PipelineClassification::Default))?;
        let mainframe_rules = catalog.resolve(profiles.select(PipelineClassification::Mainframe))?;
        Ok(Self {
            catalog,
            profiles,
            default_rules,
            mainframe_rules,
            mainframe_markers: config.effective_mainframe_task_ids(),
        })
    }

    /// Task ids marking an unclassified item as mainframe.
    pub fn with_mainframe_markers(mut self, markers: Vec<String>) -> Self {
        self.mainframe_markers = markers;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Classification of `item`: explicit, else derived from its facts.
    pub fn classify(&self, item: &ScanItem) -> PipelineClassification {
        item.classification
            .unwrap_or_else(|| classify(&item.facts, &self.mainframe_markers))
    }

    /// Evaluate every rule of the item's profile that governs its item type.
    ///
    /// Incomplete evaluations are recorded as `RuleStatus::Incomplete`. A rule
    /// without a consumable fact, or handed facts it cannot consume, is a
    /// defect in the fact supplier and is returned as an error.
    pub fn scan_item(&self, item: &ScanItem) -> Result<ItemReport, RuleError> {
        let classification = self.classify(item);
        let profile = self.profiles.select(classification);
        let rules = match classification {
            PipelineClassification::Default => &self.default_rules,
            PipelineClassification::Mainframe => &self.mainframe_rules,
        };

        let mut outcomes = Vec::new();
        for rule in rules.iter().filter(|r| r.metadata().item_type == item.item_type) {
            outcomes.push(self.run_rule(rule.as_ref(), item)?);
        }

        let report = ItemReport::new(item, profile.name(), outcomes);
        tracing::info!(
            item = %item.id,
            profile = profile.name(),
            rules = report.outcomes.len(),
            compliant = report.compliant,
            scan_failed = report.scan_failed,
            "item scanned"
        );
        Ok(report)
    }

    /// Scan items in parallel. Results keep input order.
    pub fn scan_batch(&self, items: &[ScanItem]) -> Vec<Result<ItemReport, RuleError>> {
        items.par_iter().map(|item| self.scan_item(item)).collect()
    }

    fn run_rule(&self, rule: &dyn Rule, item: &ScanItem) -> Result<RuleOutcome, RuleError> {
        let facts = item
            .facts
            .iter()
            .find(|f| rule.accepts(f.kind()))
            .ok_or_else(|| RuleError::MissingFacts {
                rule: rule.name().to_string(),
                item: item.id.clone(),
            })?;

        let start = Instant::now();
        let result = rule.evaluate(facts);
        let execution_time_ms = start.elapsed().as_millis() as u64;

        let (status, error) = match result {
            Ok(r) if r.passed() => (RuleStatus::Passed, None),
            Ok(_) => (RuleStatus::Failed, None),
            Err(e) if e.is_incomplete() => {
                tracing::warn!(item = %item.id, rule = rule.name(), error = %e, "rule evaluation incomplete");
                (RuleStatus::Incomplete, Some(e.to_string()))
            }
            Err(e) => return Err(e),
        };

        Ok(RuleOutcome {
            rule: rule.metadata().clone(),
            status,
            error,
            execution_time_ms,
        })
    }
}
