//! Name-indexed rule registry.

use std::sync::Arc;

use pipeguard_core::errors::CatalogError;
use pipeguard_core::types::FxHashMap;

use super::profiles::{ProfileSet, RuleProfile};
use crate::rules::Rule;

/// Immutable-after-construction registry of named rules.
#[derive(Default)]
pub struct RuleCatalog {
    rules: Vec<Arc<dyn Rule>>,
    index: FxHashMap<String, usize>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `rules`, rejecting duplicate names.
    pub fn with_rules(rules: Vec<Arc<dyn Rule>>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for rule in rules {
            catalog.register(rule)?;
        }
        Ok(catalog)
    }

    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<(), CatalogError> {
        let name = rule.name().to_string();
        if self.index.contains_key(&name) {
            return Err(CatalogError::DuplicateRule { rule: name });
        }
        self.index.insert(name, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Referential completeness between this catalog and `profiles`.
    pub fn validate(&self, profiles: &ProfileSet) -> Result<(), CatalogError> {
        for profile in profiles.iter() {
            if let Some(unknown) = profile.rule_names().iter().find(|n| !self.contains(n)) {
                return Err(CatalogError::UnknownRule {
                    profile: profile.name().to_string(),
                    rule: unknown.clone(),
                });
            }
        }
        let default = profiles.default_profile();
        if let Some(unreachable) = self.names().find(|n| !default.contains(n)) {
            return Err(CatalogError::UnreachableRule {
                rule: unreachable.to_string(),
            });
        }
        Ok(())
    }

    /// The rules of `profile`, in profile order.
    pub fn resolve(&self, profile: &RuleProfile) -> Result<Vec<Arc<dyn Rule>>, CatalogError> {
        profile
            .rule_names()
            .iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownRule {
                        profile: profile.name().to_string(),
                        rule: name.clone(),
                    })
            })
            .collect()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
