//! Habits slice: the canonical habit list and load status

use habit_api::{Habit, HabitAction};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Error stored when a load fails without a usable message
pub const FETCH_ERROR_FALLBACK: &str = "Failed to fetch habits";

/// State of the habits slice.
///
/// `habits` is shared copy-on-write: a transition that changes the
/// collection replaces the `Arc`, one that doesn't leaves it untouched.
/// Selectors rely on this to skip recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitState {
    pub habits: Arc<Vec<Habit>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl HabitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_habits(habits: Vec<Habit>) -> Self {
        Self {
            habits: Arc::new(habits),
            ..Self::default()
        }
    }

    pub fn find(&self, id: &habit_util::HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    /// Apply one action. Never fails: unknown ids are ignored.
    pub fn reduce(&mut self, action: HabitAction) {
        match action {
            HabitAction::Add {
                id,
                name,
                frequency,
                created_at,
            } => {
                if self.find(&id).is_some() {
                    warn!(habit_id = %id, "Ignoring add with an id already in use");
                    return;
                }
                debug!(habit_id = %id, name = %name, frequency = %frequency, "Habit added");
                Arc::make_mut(&mut self.habits).push(Habit::new(id, name, frequency, created_at));
            }

            HabitAction::Toggle { id, date } => {
                let Some(index) = self.habits.iter().position(|h| h.id == id) else {
                    debug!(habit_id = %id, "Toggle for unknown habit ignored");
                    return;
                };
                let completed = Arc::make_mut(&mut self.habits)[index].toggle(date);
                debug!(habit_id = %id, %date, completed, "Habit toggled");
            }

            HabitAction::Remove { id } => {
                if self.find(&id).is_none() {
                    debug!(habit_id = %id, "Remove for unknown habit ignored");
                    return;
                }
                Arc::make_mut(&mut self.habits).retain(|h| h.id != id);
                debug!(habit_id = %id, "Habit removed");
            }

            HabitAction::FetchPending => {
                self.is_loading = true;
            }

            HabitAction::FetchFulfilled { habits } => {
                self.is_loading = false;
                self.habits = Arc::new(habits);
            }

            HabitAction::FetchRejected { message } => {
                self.is_loading = false;
                self.error = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| FETCH_ERROR_FALLBACK.to_string()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use habit_api::Frequency;
    use habit_util::HabitId;

    fn habit(id: &str) -> Habit {
        Habit::new(HabitId::new(id), "Test Habit", Frequency::Daily, habit_util::now())
    }

    fn jan_1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn initial_state() {
        let state = HabitState::new();
        assert!(state.habits.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut state = HabitState::new();
        let names = ["Write", "Speak", "Breathe", "Sleep", "Rest", "Eat"];

        for name in names {
            state.reduce(HabitAction::add(name, Frequency::Daily));
        }

        assert_eq!(state.habits.len(), names.len());
        assert_eq!(state.habits[0].name, "Write");
        assert_eq!(state.habits[5].name, "Eat");

        let mut ids: Vec<_> = state.habits.iter().map(|h| h.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), names.len());
    }

    #[test]
    fn add_accepts_empty_name() {
        let mut state = HabitState::new();
        state.reduce(HabitAction::add("", Frequency::Weekly));
        assert_eq!(state.habits.len(), 1);
        assert_eq!(state.habits[0].name, "");
    }

    #[test]
    fn add_with_duplicate_id_is_ignored() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        state.reduce(HabitAction::Add {
            id: HabitId::new("1"),
            name: "Other".into(),
            frequency: Frequency::Weekly,
            created_at: habit_util::now(),
        });
        assert_eq!(state.habits.len(), 1);
        assert_eq!(state.habits[0].name, "Test Habit");
    }

    #[test]
    fn toggle_to_complete() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        state.reduce(HabitAction::toggle("1", jan_1()));

        assert!(state.habits[0].is_completed_on(jan_1()));
        assert_eq!(state.habits[0].completed_dates.len(), 1);
    }

    #[test]
    fn toggle_to_incomplete() {
        let mut state =
            HabitState::with_habits(vec![habit("1").with_completions([jan_1()])]);
        state.reduce(HabitAction::toggle("1", jan_1()));

        assert!(!state.habits[0].is_completed_on(jan_1()));
    }

    #[test]
    fn toggle_twice_restores_completions() {
        let other = jan_1().succ_opt().unwrap();
        let mut state = HabitState::with_habits(vec![habit("1").with_completions([other])]);
        let before = state.habits[0].completed_dates.clone();

        state.reduce(HabitAction::toggle("1", jan_1()));
        state.reduce(HabitAction::toggle("1", jan_1()));

        assert_eq!(state.habits[0].completed_dates, before);
    }

    #[test]
    fn toggle_unknown_id_keeps_collection_identity() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        let before = state.habits.clone();

        state.reduce(HabitAction::toggle("nope", jan_1()));

        assert!(Arc::ptr_eq(&before, &state.habits));
    }

    #[test]
    fn toggle_replaces_collection_identity() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        let before = state.habits.clone();

        state.reduce(HabitAction::toggle("1", jan_1()));

        assert!(!Arc::ptr_eq(&before, &state.habits));
        assert!(before[0].completed_dates.is_empty());
    }

    #[test]
    fn remove_habit() {
        let mut state = HabitState::with_habits(vec![habit("1"), habit("2"), habit("3")]);
        state.reduce(HabitAction::remove("2"));

        let ids: Vec<_> = state.habits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn operations_after_remove_are_noops() {
        let mut state = HabitState::with_habits(vec![habit("1"), habit("2")]);
        state.reduce(HabitAction::remove("1"));
        let after_remove = state.clone();

        state.reduce(HabitAction::toggle("1", jan_1()));
        state.reduce(HabitAction::remove("1"));

        assert_eq!(state, after_remove);
        assert!(Arc::ptr_eq(&state.habits, &after_remove.habits));
    }

    #[test]
    fn fetch_pending_keeps_error_and_habits() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        state.error = Some("earlier failure".into());

        state.reduce(HabitAction::FetchPending);

        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("earlier failure"));
        assert_eq!(state.habits.len(), 1);
    }

    #[test]
    fn fetch_fulfilled_replaces_habits() {
        let mut state = HabitState::with_habits(vec![habit("local")]);
        state.reduce(HabitAction::FetchPending);

        let fetched = vec![Habit::new(
            HabitId::new("1"),
            "Fetched Habit",
            Frequency::Daily,
            habit_util::now(),
        )];
        state.reduce(HabitAction::FetchFulfilled {
            habits: fetched.clone(),
        });

        assert!(!state.is_loading);
        assert_eq!(*state.habits, fetched);
    }

    #[test]
    fn fetch_rejected_with_message() {
        let mut state = HabitState::new();
        state.reduce(HabitAction::FetchPending);
        state.reduce(HabitAction::FetchRejected {
            message: Some("Internal Server Error".into()),
        });

        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn fetch_rejected_without_message_uses_fallback() {
        for message in [None, Some(String::new())] {
            let mut state = HabitState::new();
            state.reduce(HabitAction::FetchRejected { message });

            assert!(!state.is_loading);
            assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_FALLBACK));
        }
    }

    #[test]
    fn fetch_rejected_leaves_habits_intact() {
        let mut state = HabitState::with_habits(vec![habit("1")]);
        let before = state.habits.clone();

        state.reduce(HabitAction::FetchRejected { message: None });

        assert!(Arc::ptr_eq(&before, &state.habits));
    }

    #[test]
    fn serializes_like_the_debug_panel() {
        let state = HabitState::new();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "habits": [], "isLoading": false, "error": null })
        );
    }
}
