//! Default paths for the habit tracker
//!
//! - Config: `$HABITS_CONFIG`, else `$XDG_CONFIG_HOME/habits/config.toml`
//!   (or the platform equivalent), else `./habits.toml`

use std::path::PathBuf;

/// Environment variable for overriding the config path
pub const HABITS_CONFIG_ENV: &str = "HABITS_CONFIG";

/// Application subdirectory name
const APP_DIR: &str = "habits";

const CONFIG_FILENAME: &str = "config.toml";

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$HABITS_CONFIG` environment variable (if set)
/// 2. `<config dir>/habits/config.toml`
/// 3. `./habits.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(HABITS_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking the `HABITS_CONFIG` env var.
pub fn config_path_without_env() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR).join(CONFIG_FILENAME),
        None => PathBuf::from("habits.toml"),
    }
}
