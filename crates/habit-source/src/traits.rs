//! Habit source trait

use async_trait::async_trait;
use habit_api::Habit;
use thiserror::Error;

/// Errors from fetching habits.
///
/// These never escape the store: a failed fetch becomes the rejection
/// message stored on the habit state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("{0}")]
    Unavailable(String),

    #[error("Failed to read habits: {0}")]
    Io(String),

    #[error("Invalid habit data: {0}")]
    Parse(String),

    /// The failure carried no message
    #[error("Fetch failed")]
    Unspecified,
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Message to surface on rejection, if the failure has one
    pub fn message(&self) -> Option<String> {
        match self {
            SourceError::Unspecified => None,
            SourceError::Unavailable(msg) => Some(msg.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Where `loadHabits` gets its habits from
#[async_trait]
pub trait HabitSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch the full habit collection
    async fn fetch_habits(&self) -> SourceResult<Vec<Habit>>;
}
