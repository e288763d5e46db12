//! Configuration system for Pipeguard.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod cache_config;
pub mod pipeguard_config;
pub mod rules_config;
pub mod search_config;

pub use cache_config::CacheConfig;
pub use pipeguard_config::{CliOverrides, PipeguardConfig};
pub use rules_config::RulesConfig;
pub use search_config::SearchConfig;
