//! Closed enumerations of forbidden capabilities per protected resource.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::evaluatable::{Evaluatable, FactKind, PermissionEvaluatable};

/// A forbidden capability tracked for one protected-resource type.
///
/// Each implementor is a closed enum; `permissions` picks the matching
/// permission snapshot out of an `Evaluatable`.
pub trait MisuseKind:
    Copy + Eq + Ord + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Fact kind carrying grants for this misuse enumeration.
    const FACT_KIND: FactKind;

    /// Every kind, in declaration order.
    fn all() -> &'static [Self];

    /// Stable kebab-case name.
    fn as_str(&self) -> &'static str;

    /// The permission snapshot for this enumeration, if `evaluatable` is one.
    fn permissions(evaluatable: &Evaluatable) -> Option<&PermissionEvaluatable<Self>>;
}

macro_rules! misuse_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(MisuseKind::as_str(self))
            }
        }
    };
}

/// Misuse of a build or release pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineMisuse {
    DeletePipeline,
    /// Delete individual runs (builds or releases) and their logs.
    DeleteRuns,
    /// Grant permissions, including to oneself.
    ManagePermissions,
}

impl MisuseKind for PipelineMisuse {
    const FACT_KIND: FactKind = FactKind::PipelinePermissions;

    fn all() -> &'static [Self] {
        &[Self::DeletePipeline, Self::DeleteRuns, Self::ManagePermissions]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DeletePipeline => "delete-pipeline",
            Self::DeleteRuns => "delete-runs",
            Self::ManagePermissions => "manage-permissions",
        }
    }

    fn permissions(evaluatable: &Evaluatable) -> Option<&PermissionEvaluatable<Self>> {
        match evaluatable {
            Evaluatable::PipelinePermissions(p) => Some(p),
            _ => None,
        }
    }
}

misuse_display!(PipelineMisuse);

/// Misuse of a source repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoryMisuse {
    DeleteRepository,
    ManagePermissions,
    BypassPoliciesWhenPushing,
    BypassPoliciesWhenCompletingPullRequests,
}

impl MisuseKind for RepositoryMisuse {
    const FACT_KIND: FactKind = FactKind::RepositoryPermissions;

    fn all() -> &'static [Self] {
        &[
            Self::DeleteRepository,
            Self::ManagePermissions,
            Self::BypassPoliciesWhenPushing,
            Self::BypassPoliciesWhenCompletingPullRequests,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteRepository => "delete-repository",
            Self::ManagePermissions => "manage-permissions",
            Self::BypassPoliciesWhenPushing => "bypass-policies-when-pushing",
            Self::BypassPoliciesWhenCompletingPullRequests => {
                "bypass-policies-when-completing-pull-requests"
            }
        }
    }

    fn permissions(evaluatable: &Evaluatable) -> Option<&PermissionEvaluatable<Self>> {
        match evaluatable {
            Evaluatable::RepositoryPermissions(p) => Some(p),
            _ => None,
        }
    }
}

misuse_display!(RepositoryMisuse);

/// Misuse of a team project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectMisuse {
    DeleteProject,
    ManagePermissions,
}

impl MisuseKind for ProjectMisuse {
    const FACT_KIND: FactKind = FactKind::ProjectPermissions;

    fn all() -> &'static [Self] {
        &[Self::DeleteProject, Self::ManagePermissions]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteProject => "delete-project",
            Self::ManagePermissions => "manage-permissions",
        }
    }

    fn permissions(evaluatable: &Evaluatable) -> Option<&PermissionEvaluatable<Self>> {
        match evaluatable {
            Evaluatable::ProjectPermissions(p) => Some(p),
            _ => None,
        }
    }
}

misuse_display!(ProjectMisuse);
