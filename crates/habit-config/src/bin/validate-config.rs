//! Checks one or more habit tracker configuration files.
//!
//! Exits non-zero if any file fails to load.

use habit_config::{CURRENT_CONFIG_VERSION, ConfigError, Settings, SourceSettings};
use habit_util::default_config_path;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn describe(settings: &Settings) -> String {
    let source = match &settings.source {
        SourceSettings::Static { delay } => format!("static, {} ms", delay.as_millis()),
        SourceSettings::File { path } => format!("file {}", path.display()),
    };
    let logging = if settings.store.enable_action_logging {
        "on"
    } else {
        "off"
    };
    format!("version {CURRENT_CONFIG_VERSION}; action logging {logging}; source {source}")
}

fn problems(error: &ConfigError) -> Vec<String> {
    match error {
        ConfigError::ValidationFailed { errors } => {
            errors.iter().map(ToString::to_string).collect()
        }
        other => vec![other.to_string()],
    }
}

fn check(path: &Path) -> bool {
    match habit_config::load_config(path) {
        Ok(settings) => {
            println!("ok    {}: {}", path.display(), describe(&settings));
            true
        }
        Err(error) => {
            eprintln!("error {}:", path.display());
            for problem in problems(&error) {
                eprintln!("      {problem}");
            }
            false
        }
    }
}

fn main() -> ExitCode {
    let mut paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths.push(default_config_path());
    }

    let failures = paths.iter().filter(|path| !check(path)).count();
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
