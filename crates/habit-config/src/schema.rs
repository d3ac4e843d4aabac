//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Store behaviour
    #[serde(default)]
    pub store: RawStoreConfig,

    /// Where `loadHabits` fetches from
    #[serde(default)]
    pub source: RawSourceConfig,
}

/// Store-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStoreConfig {
    /// Record dispatched actions in the action log.
    /// Defaults to on in debug builds and off in release builds.
    pub enable_action_logging: Option<bool>,
}

/// Habit source settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSourceConfig {
    /// "static" (default) or "file"
    pub kind: Option<String>,

    /// Simulated latency of the static source, in milliseconds
    pub delay_ms: Option<u64>,

    /// JSON file of habits, required for the file source
    pub path: Option<PathBuf>,
}
