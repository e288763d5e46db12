//! Permission-misuse detection over nested (possibly cyclic) groups.

use std::collections::VecDeque;

use pipeguard_core::errors::{ConfigError, RuleError};
use pipeguard_core::types::{
    EvaluationResult, Evaluatable, FactKind, FxHashSet, GroupId, Identity,
    MisuseKind, PermissionEvaluatable, SmallVec4, User,
};

use super::types::{invalid_argument, Rule, RuleMetadata};

/// Proves whether any concrete user can reach a granted capability.
pub struct MisuseDetector<'a, K> {
    permissions: &'a PermissionEvaluatable<K>,
}

impl<'a, K: MisuseKind> MisuseDetector<'a, K> {
    pub fn new(permissions: &'a PermissionEvaluatable<K>) -> Self {
        Self { permissions }
    }

    /// A kind nobody was granted is safe by absence.
    pub fn is_safe(&self, kind: K) -> bool {
        self.reachable_user(kind).is_none()
    }

    /// The first user that holds `kind`, directly or through nested groups.
    ///
    /// Worklist search keyed on `GroupId`: a group already visited
    /// contributes nothing, so membership cycles terminate.
    pub fn reachable_user(&self, kind: K) -> Option<&'a User> {
        let granted = self.permissions.granted(kind)?;
        let directory = &self.permissions.directory;

        let mut visited: FxHashSet<&'a GroupId> = FxHashSet::default();
        let mut queue: VecDeque<&'a Identity> = granted.iter().collect();

        while let Some(identity) = queue.pop_front() {
            match identity {
                Identity::User(user) => return Some(user),
                Identity::Group(group) => {
                    if !visited.insert(&group.id) {
                        continue;
                    }
                    queue.extend(group.members.iter());
                    queue.extend(directory.members(&group.id).iter());
                }
            }
        }
        None
    }

    /// First unsafe kind in `kinds` (in order) with the user proving it.
    pub fn find_offender(&self, kinds: &[K]) -> Option<(K, &'a User)> {
        if self.permissions.grants.is_empty() {
            return None;
        }
        kinds
            .iter()
            .find_map(|&kind| self.reachable_user(kind).map(|user| (kind, user)))
    }
}

/// Passes iff no user can perform any of a fixed set of misuse kinds.
pub struct MisuseRule<K> {
    metadata: RuleMetadata,
    kinds: SmallVec4<K>,
}

impl<K: MisuseKind> MisuseRule<K> {
    /// Fails when `kinds` is empty. Duplicates are dropped, order is kept.
    pub fn new(metadata: RuleMetadata, kinds: Vec<K>) -> Result<Self, ConfigError> {
        if kinds.is_empty() {
            return Err(ConfigError::InvalidRule {
                rule: metadata.name,
                message: "misuse kind set must not be empty".to_string(),
            });
        }
        let mut unique: SmallVec4<K> = SmallVec4::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Ok(Self {
            metadata,
            kinds: unique,
        })
    }

    pub fn kinds(&self) -> &[K] {
        &self.kinds
    }
}

impl<K: MisuseKind> Rule for MisuseRule<K> {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn accepts(&self, kind: FactKind) -> bool {
        kind == K::FACT_KIND
    }

    fn evaluate(&self, evaluatable: &Evaluatable) -> Result<EvaluationResult, RuleError> {
        let permissions =
            K::permissions(evaluatable).ok_or_else(|| invalid_argument(&self.metadata, evaluatable))?;

        match MisuseDetector::new(permissions).find_offender(&self.kinds) {
            Some((kind, user)) => {
                tracing::debug!(
                    rule = %self.metadata.name,
                    misuse = %kind,
                    user = %user.id,
                    "user can reach forbidden capability"
                );
                Ok(EvaluationResult::fail())
            }
            None => Ok(EvaluationResult::pass()),
        }
    }
}
