//! Validated settings

use crate::schema::{RawConfig, RawSourceConfig, RawStoreConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Latency of the reference static source
pub const DEFAULT_SOURCE_DELAY: Duration = Duration::from_millis(1000);

/// Validated settings ready for use by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub store: StoreSettings,
    pub source: SourceSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            store: StoreSettings::from_raw(raw.store),
            source: SourceSettings::from_raw(raw.source),
        }
    }
}

/// Store behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Record dispatched actions in the action log.
    /// Evaluated once when the store is built.
    pub enable_action_logging: bool,
}

impl StoreSettings {
    fn from_raw(raw: RawStoreConfig) -> Self {
        Self {
            enable_action_logging: raw
                .enable_action_logging
                .unwrap_or_else(default_action_logging),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            enable_action_logging: default_action_logging(),
        }
    }
}

/// Action logging is a development aid: on for debug builds only
pub fn default_action_logging() -> bool {
    cfg!(debug_assertions)
}

/// Where habits are loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    /// Fixed two-habit result after a delay
    Static { delay: Duration },
    /// JSON array of habits read from disk
    File { path: PathBuf },
}

impl SourceSettings {
    fn from_raw(raw: RawSourceConfig) -> Self {
        match (raw.kind.as_deref(), raw.path) {
            (Some("file"), Some(path)) => SourceSettings::File { path },
            _ => SourceSettings::Static {
                delay: raw
                    .delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_SOURCE_DELAY),
            },
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings::Static {
            delay: DEFAULT_SOURCE_DELAY,
        }
    }
}
