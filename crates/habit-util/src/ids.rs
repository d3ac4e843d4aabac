//! Strongly-typed identifiers for habits

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a habit, unique for the lifetime of a store.
///
/// Locally created habits get a random UUID; habits arriving from a
/// source keep whatever identifier the source assigned (e.g. `"1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
