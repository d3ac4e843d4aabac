//! Derived, read-only views over the habits slice

use chrono::NaiveDate;
use habit_api::{Habit, HabitStats};
use std::sync::Arc;
use tracing::trace;

use crate::HabitState;

/// The habit collection, shared with the state it came from
pub fn select_habits(state: &HabitState) -> Arc<Vec<Habit>> {
    state.habits.clone()
}

/// Current streak of `habit`: consecutive completed days ending `today`.
///
/// Zero when the habit was not completed on `today`, even if it has an
/// unbroken run ending yesterday.
pub fn streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        if !habit.is_completed_on(current) {
            break;
        }
        count += 1;
        day = current.pred_opt();
    }
    count
}

/// Compute statistics without caching
pub fn compute_stats(habits: &[Habit], today: NaiveDate) -> HabitStats {
    HabitStats {
        total: habits.len(),
        completed_today: habits.iter().filter(|h| h.is_completed_on(today)).count(),
        longest_streak: habits.iter().map(|h| streak(h, today)).max().unwrap_or(0),
    }
}

/// Memoized [`compute_stats`].
///
/// Keyed on the identity of the habit collection and the calendar day:
/// transitions that leave the collection alone (loading flag, errors, the
/// action log) are served from the cache.
#[derive(Debug, Default)]
pub struct StatsSelector {
    cached: Option<CachedStats>,
    recomputations: u64,
}

#[derive(Debug)]
struct CachedStats {
    habits: Arc<Vec<Habit>>,
    today: NaiveDate,
    stats: HabitStats,
}

impl StatsSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, habits: &Arc<Vec<Habit>>, today: NaiveDate) -> HabitStats {
        if let Some(cached) = &self.cached
            && Arc::ptr_eq(&cached.habits, habits)
            && cached.today == today
        {
            return cached.stats;
        }

        let stats = compute_stats(habits, today);
        self.recomputations += 1;
        trace!(
            total = stats.total,
            completed_today = stats.completed_today,
            longest_streak = stats.longest_streak,
            "Habit stats recomputed"
        );

        // Holding a strong reference keeps the allocation alive, so a later
        // collection can never reuse this address.
        self.cached = Some(CachedStats {
            habits: habits.clone(),
            today,
            stats,
        });
        stats
    }

    /// How many times stats were actually computed
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
