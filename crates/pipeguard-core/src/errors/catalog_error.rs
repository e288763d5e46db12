//! Rule catalog consistency errors.

use super::error_code::{self, PipeguardErrorCode};
use super::ConfigError;

/// Referential-completeness violations between rules and profiles.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Profile {profile} references unknown rule {rule}")]
    UnknownRule { profile: String, rule: String },

    #[error("Rule {rule} is not part of the default profile")]
    UnreachableRule { rule: String },

    #[error("Rule {rule} is registered more than once")]
    DuplicateRule { rule: String },

    #[error("Rule construction failed: {0}")]
    InvalidRule(#[from] ConfigError),
}

impl PipeguardErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRule(e) => e.error_code(),
            _ => error_code::CATALOG_ERROR,
        }
    }
}
