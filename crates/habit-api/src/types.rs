//! Shared types for the habit tracker

use chrono::{DateTime, Local, NaiveDate};
use habit_util::HabitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How often a habit is meant to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = habit_util::HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(habit_util::HabitError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A tracked habit and its completion history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    /// Display name. Not validated here; see `HabitAction::add`.
    pub name: String,
    pub frequency: Frequency,
    /// Days on which the habit was completed, serialized as `YYYY-MM-DD`
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    pub created_at: DateTime<Local>,
}

impl Habit {
    pub fn new(
        id: HabitId,
        name: impl Into<String>,
        frequency: Frequency,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            frequency,
            completed_dates: BTreeSet::new(),
            created_at,
        }
    }

    pub fn with_completions(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.completed_dates.extend(dates);
        self
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip completion for `date`. Returns whether the habit is now
    /// completed on that day.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }
}

/// Aggregate statistics derived from the habit collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub total: usize,
    pub completed_today: usize,
    pub longest_streak: u32,
}
