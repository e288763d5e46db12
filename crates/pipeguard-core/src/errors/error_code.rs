//! PipeguardErrorCode trait for structured error reporting.

/// Trait for mapping Pipeguard errors to stable error code strings.
/// Every error enum implements this so the report consumer can tell a
/// defect apart from an incomplete scan without parsing messages.
pub trait PipeguardErrorCode {
    /// Returns the error code string (e.g., "FETCH_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const INVALID_RULE_CONFIG: &str = "INVALID_RULE_CONFIG";
pub const MISSING_FACTS: &str = "MISSING_FACTS";
pub const EVALUATION_INCOMPLETE: &str = "EVALUATION_INCOMPLETE";
pub const FETCH_FAILED: &str = "FETCH_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CANCELLED: &str = "CANCELLED";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
