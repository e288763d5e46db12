//! Error handling for Pipeguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod fetch_error;
pub mod rule_error;
pub mod search_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::PipeguardErrorCode;
pub use fetch_error::FetchError;
pub use rule_error::RuleError;
pub use search_error::SearchError;
