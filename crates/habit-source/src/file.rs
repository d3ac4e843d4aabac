//! JSON file habit source

use async_trait::async_trait;
use habit_api::Habit;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{HabitSource, SourceError, SourceResult};

/// Reads a JSON array of habits from disk on every fetch.
///
/// Read-only: the store never writes back.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HabitSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_habits(&self) -> SourceResult<Vec<Habit>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let habits: Vec<Habit> = serde_json::from_str(&content)?;

        let mut seen = HashSet::new();
        for habit in &habits {
            if !seen.insert(&habit.id) {
                return Err(SourceError::Parse(format!("duplicate habit id '{}'", habit.id)));
            }
        }

        debug!(path = %self.path.display(), count = habits.len(), "Read habits from file");
        Ok(habits)
    }
}
