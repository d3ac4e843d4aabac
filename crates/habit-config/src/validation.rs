//! Configuration validation

use crate::schema::{RawConfig, RawSourceConfig};
use thiserror::Error;

/// Longest simulated latency accepted for the static source
pub const MAX_SOURCE_DELAY_MS: u64 = 60_000;

/// Validation error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown source kind '{0}' (expected \"static\" or \"file\")")]
    UnknownSourceKind(String),

    #[error("Source kind 'file' requires a path")]
    MissingSourcePath,

    #[error("Source path cannot be empty")]
    EmptySourcePath,

    #[error("Source delay {delay_ms}ms exceeds the maximum of {max_ms}ms")]
    DelayTooLong { delay_ms: u64, max_ms: u64 },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    validate_source(&config.source)
}

fn validate_source(source: &RawSourceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let kind = source.kind.as_deref().unwrap_or("static");
    match kind {
        "static" => {}
        "file" => {
            if source.path.is_none() {
                errors.push(ValidationError::MissingSourcePath);
            }
        }
        other => errors.push(ValidationError::UnknownSourceKind(other.to_string())),
    }

    if let Some(path) = &source.path
        && path.as_os_str().is_empty()
    {
        errors.push(ValidationError::EmptySourcePath);
    }

    if let Some(delay_ms) = source.delay_ms
        && delay_ms > MAX_SOURCE_DELAY_MS
    {
        errors.push(ValidationError::DelayTooLong {
            delay_ms,
            max_ms: MAX_SOURCE_DELAY_MS,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with_source(source: RawSourceConfig) -> RawConfig {
        RawConfig {
            config_version: 1,
            store: Default::default(),
            source,
        }
    }

    #[test]
    fn default_source_is_valid() {
        let config = config_with_source(RawSourceConfig::default());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn file_source_requires_path() {
        let config = config_with_source(RawSourceConfig {
            kind: Some("file".into()),
            ..Default::default()
        });
        assert_eq!(validate_config(&config), vec![ValidationError::MissingSourcePath]);
    }

    #[test]
    fn collects_every_error() {
        let config = config_with_source(RawSourceConfig {
            kind: Some("carrier-pigeon".into()),
            delay_ms: Some(MAX_SOURCE_DELAY_MS + 1),
            path: Some(PathBuf::new()),
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownSourceKind(k) if k == "carrier-pigeon")));
        assert!(errors.contains(&ValidationError::EmptySourcePath));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DelayTooLong { .. })));
    }
}
