//! Top-level Pipeguard configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CacheConfig, RulesConfig, SearchConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "pipeguard.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PIPEGUARD_*`)
/// 3. Project config (`pipeguard.toml` in project root)
/// 4. User config (`~/.pipeguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipeguardConfig {
    pub cache: CacheConfig,
    pub search: SearchConfig,
    pub rules: RulesConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub cache_ttl_seconds: Option<u64>,
    pub fetch_threads: Option<usize>,
    pub min_retention_days: Option<i64>,
}

impl PipeguardConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PipeguardConfig) -> Result<(), ConfigError> {
        if config.cache.ttl_seconds == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.ttl_seconds".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.cache.max_entries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(days) = config.rules.min_retention_days {
            if days < 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.min_retention_days".to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        if let Some(approvers) = config.rules.min_approvers {
            if approvers < 1 {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.min_approvers".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if config.rules.mainframe_task_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "rules.mainframe_task_ids".to_string(),
                message: "must not contain empty task ids".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pipeguard/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".pipeguard").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PipeguardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PipeguardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut PipeguardConfig, other: &PipeguardConfig) {
        if other.cache.ttl_seconds.is_some() {
            base.cache.ttl_seconds = other.cache.ttl_seconds;
        }
        if other.cache.max_entries.is_some() {
            base.cache.max_entries = other.cache.max_entries;
        }

        if other.search.fetch_threads.is_some() {
            base.search.fetch_threads = other.search.fetch_threads;
        }

        if other.rules.min_retention_days.is_some() {
            base.rules.min_retention_days = other.rules.min_retention_days;
        }
        if other.rules.min_approvers.is_some() {
            base.rules.min_approvers = other.rules.min_approvers;
        }
        if !other.rules.mainframe_task_ids.is_empty() {
            base.rules.mainframe_task_ids = other.rules.mainframe_task_ids.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PIPEGUARD_CACHE_TTL_SECONDS`, `PIPEGUARD_SEARCH_FETCH_THREADS`, etc.
    fn apply_env_overrides(config: &mut PipeguardConfig) {
        if let Ok(val) = std::env::var("PIPEGUARD_CACHE_TTL_SECONDS") {
            if let Ok(v) = val.parse::<u64>() {
                config.cache.ttl_seconds = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PIPEGUARD_CACHE_MAX_ENTRIES") {
            if let Ok(v) = val.parse::<u64>() {
                config.cache.max_entries = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PIPEGUARD_SEARCH_FETCH_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.search.fetch_threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PIPEGUARD_RULES_MIN_RETENTION_DAYS") {
            if let Ok(v) = val.parse::<i64>() {
                config.rules.min_retention_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PIPEGUARD_RULES_MIN_APPROVERS") {
            if let Ok(v) = val.parse::<i64>() {
                config.rules.min_approvers = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PipeguardConfig, cli: &CliOverrides) {
        if let Some(v) = cli.cache_ttl_seconds {
            config.cache.ttl_seconds = Some(v);
        }
        if let Some(v) = cli.fetch_threads {
            config.search.fetch_threads = Some(v);
        }
        if let Some(v) = cli.min_retention_days {
            config.rules.min_retention_days = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
