//! Principals: users and (possibly nested, possibly cyclic) groups.

use serde::{Deserialize, Serialize};

use super::collections::BTreeMap;
use super::identifiers::GroupId;

/// A principal that can hold a permission grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Identity {
    /// A concrete user. Terminal: never expanded further.
    User(User),
    /// A group whose members may be users or further groups.
    Group(Group),
}

impl Identity {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(User {
            id: id.into(),
            display_name: String::new(),
        })
    }

    /// A group reference with no inline members; membership is expected in
    /// the snapshot's `GroupDirectory`.
    pub fn group(id: impl Into<GroupId>) -> Self {
        Self::Group(Group::new(id))
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub display_name: String,
    /// Immediate members populated by the fact supplier.
    #[serde(default)]
    pub members: Vec<Identity>,
}

impl Group {
    pub fn new(id: impl Into<GroupId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Identity>) -> Self {
        self.members = members;
        self
    }
}

/// Group memberships resolved after the initial snapshot was taken.
///
/// The supplier inlines only the immediate members of granted groups;
/// deeper groups are referenced by id and looked up here while the
/// misuse detector walks the hierarchy. Entries may form cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupDirectory {
    memberships: BTreeMap<GroupId, Vec<Identity>>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (replace) the members of `group`.
    pub fn insert(&mut self, group: impl Into<GroupId>, members: Vec<Identity>) {
        self.memberships.insert(group.into(), members);
    }

    pub fn with_group(mut self, group: impl Into<GroupId>, members: Vec<Identity>) -> Self {
        self.insert(group, members);
        self
    }

    /// Members recorded for `group`; empty when unknown.
    pub fn members(&self, group: &GroupId) -> &[Identity] {
        self.memberships
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }
}
