//! Configuration parsing and validation for the habit tracker
//!
//! The config file is TOML, versioned by `config_version`. It carries:
//! - `[store]`: whether the action logger records
//! - `[source]`: where `loadHabits` fetches from (static stand-in or JSON file)
//!
//! Every validation problem is reported at once rather than the first only.

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Why a config file could not be turned into [`Settings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read habits config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Malformed habits config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("{} invalid setting(s): {errors:?}", .errors.len())]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("config_version {0} is not supported (expected {})", CURRENT_CONFIG_VERSION)]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// The only `config_version` this build reads
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Read, parse and validate the config at `path`
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Like [`load_config`], but a missing file yields default settings
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    load_config(path)
}

/// Parse and validate config text
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}
