//! Error types for the habit tracker

use thiserror::Error;

/// Errors raised while turning user input into store commands.
///
/// The store itself never fails; these only exist at the boundary where
/// text is parsed into typed commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown frequency '{0}': expected daily or weekly")]
    UnknownFrequency(String),

    #[error("Habit name cannot be empty")]
    EmptyName,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

impl HabitError {
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate(value.into())
    }

    pub fn unknown_command(value: impl Into<String>) -> Self {
        Self::UnknownCommand(value.into())
    }
}

pub type Result<T> = std::result::Result<T, HabitError>;
