//! Reference stand-in for a remote habit service

use async_trait::async_trait;
use habit_api::{Frequency, Habit};
use habit_util::HabitId;
use std::time::Duration;

use crate::{HabitSource, SourceResult};

/// Waits a fixed delay, then returns two fresh daily habits
/// (`"1"` Read and `"2"` Exercise)
#[derive(Debug, Clone)]
pub struct StaticSource {
    delay: Duration,
}

impl StaticSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The fixed result, stamped with the current time
    pub fn habits() -> Vec<Habit> {
        let now = habit_util::now();
        vec![
            Habit::new(HabitId::new("1"), "Read", Frequency::Daily, now),
            Habit::new(HabitId::new("2"), "Exercise", Frequency::Daily, now),
        ]
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl HabitSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_habits(&self) -> SourceResult<Vec<Habit>> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::habits())
    }
}
