//! Action types for the habit tracker
//!
//! Actions are the only way to request state changes. Each carries a
//! stable type identifier of the form `<slice>/<action>` and an optional
//! JSON payload used by the action log.

use chrono::{DateTime, Local, NaiveDate};
use habit_util::HabitId;
use serde_json::{Value, json};

use crate::{Frequency, Habit, LogEntry};

/// Namespace prefix of the habits slice
pub const HABITS_NAMESPACE: &str = "habits/";

/// Namespace prefix of the debug (action log) slice
pub const DEBUG_NAMESPACE: &str = "debug/";

pub const ADD_HABIT: &str = "habits/addHabit";
pub const TOGGLE_HABIT: &str = "habits/toggleHabit";
pub const REMOVE_HABIT: &str = "habits/removeHabit";
pub const FETCH_HABITS_PENDING: &str = "habits/fetchHabits/pending";
pub const FETCH_HABITS_FULFILLED: &str = "habits/fetchHabits/fulfilled";
pub const FETCH_HABITS_REJECTED: &str = "habits/fetchHabits/rejected";
pub const LOG_ACTIONS: &str = "debug/logActions";
pub const CLEAR_ACTIONS: &str = "debug/clearActions";

/// Actions handled by the habits slice
#[derive(Debug, Clone, PartialEq)]
pub enum HabitAction {
    /// Append a new habit. Built through [`HabitAction::add`], which
    /// assigns the id and creation time so the reducer stays deterministic.
    Add {
        id: HabitId,
        name: String,
        frequency: Frequency,
        created_at: DateTime<Local>,
    },

    /// Flip completion of `date` for habit `id`
    Toggle { id: HabitId, date: NaiveDate },

    /// Remove habit `id`
    Remove { id: HabitId },

    /// A load has started
    FetchPending,

    /// A load finished; replaces the whole collection
    FetchFulfilled { habits: Vec<Habit> },

    /// A load failed; `message` is `None` when the failure carried none
    FetchRejected { message: Option<String> },
}

impl HabitAction {
    /// Create an add action with a fresh id and the current time.
    ///
    /// The name is passed through untouched: rejecting empty names is the
    /// caller's job.
    pub fn add(name: impl Into<String>, frequency: Frequency) -> Self {
        Self::add_with_id(name, frequency).1
    }

    /// Like [`HabitAction::add`], also handing back the id it assigned
    pub fn add_with_id(name: impl Into<String>, frequency: Frequency) -> (HabitId, Self) {
        let id = HabitId::generate();
        let action = Self::Add {
            id: id.clone(),
            name: name.into(),
            frequency,
            created_at: habit_util::now(),
        };
        (id, action)
    }

    pub fn toggle(id: impl Into<HabitId>, date: NaiveDate) -> Self {
        Self::Toggle {
            id: id.into(),
            date,
        }
    }

    pub fn remove(id: impl Into<HabitId>) -> Self {
        Self::Remove { id: id.into() }
    }

    pub fn action_type(&self) -> &'static str {
        match self {
            HabitAction::Add { .. } => ADD_HABIT,
            HabitAction::Toggle { .. } => TOGGLE_HABIT,
            HabitAction::Remove { .. } => REMOVE_HABIT,
            HabitAction::FetchPending => FETCH_HABITS_PENDING,
            HabitAction::FetchFulfilled { .. } => FETCH_HABITS_FULFILLED,
            HabitAction::FetchRejected { .. } => FETCH_HABITS_REJECTED,
        }
    }

    pub fn payload(&self) -> Option<Value> {
        match self {
            HabitAction::Add {
                id,
                name,
                frequency,
                created_at,
            } => Some(json!({
                "id": id,
                "name": name,
                "frequency": frequency,
                "createdAt": created_at,
            })),
            HabitAction::Toggle { id, date } => Some(json!({
                "id": id,
                "date": habit_util::format_date(*date),
            })),
            HabitAction::Remove { id } => Some(json!({ "id": id })),
            HabitAction::FetchPending => None,
            HabitAction::FetchFulfilled { habits } => serde_json::to_value(habits).ok(),
            HabitAction::FetchRejected { message } => Some(json!({ "message": message })),
        }
    }
}

/// Actions handled by the debug slice
#[derive(Debug, Clone, PartialEq)]
pub enum DebugAction {
    /// Append an entry, evicting the oldest once the log is full
    LogAction(LogEntry),

    /// Empty the log
    ClearActions,
}

impl DebugAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            DebugAction::LogAction(_) => LOG_ACTIONS,
            DebugAction::ClearActions => CLEAR_ACTIONS,
        }
    }

    pub fn payload(&self) -> Option<Value> {
        match self {
            DebugAction::LogAction(entry) => serde_json::to_value(entry).ok(),
            DebugAction::ClearActions => None,
        }
    }
}

/// Any action accepted by the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Habits(HabitAction),
    Debug(DebugAction),
}

impl Action {
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::Habits(action) => action.action_type(),
            Action::Debug(action) => action.action_type(),
        }
    }

    pub fn payload(&self) -> Option<Value> {
        match self {
            Action::Habits(action) => action.payload(),
            Action::Debug(action) => action.payload(),
        }
    }

    /// Whether this action belongs to the action log's own namespace
    pub fn is_debug(&self) -> bool {
        self.action_type().starts_with(DEBUG_NAMESPACE)
    }
}

impl From<HabitAction> for Action {
    fn from(action: HabitAction) -> Self {
        Action::Habits(action)
    }
}

impl From<DebugAction> for Action {
    fn from(action: DebugAction) -> Self {
        Action::Debug(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_distinct_ids() {
        let a = HabitAction::add("Read", Frequency::Daily);
        let b = HabitAction::add("Read", Frequency::Daily);

        match (a, b) {
            (HabitAction::Add { id: id_a, .. }, HabitAction::Add { id: id_b, .. }) => {
                assert_ne!(id_a, id_b)
            }
            _ => panic!("expected add actions"),
        }
    }

    #[test]
    fn add_with_id_returns_the_assigned_id() {
        let (id, action) = HabitAction::add_with_id("Read", Frequency::Weekly);

        let HabitAction::Add {
            id: assigned,
            frequency,
            ..
        } = action
        else {
            panic!("expected an add action");
        };
        assert_eq!(id, assigned);
        assert_eq!(frequency, Frequency::Weekly);
    }

    #[test]
    fn add_keeps_empty_name() {
        let action = HabitAction::add("", Frequency::Weekly);
        assert!(matches!(action, HabitAction::Add { ref name, .. } if name.is_empty()));
    }

    #[test]
    fn type_identifiers_are_namespaced() {
        let habit_actions: Vec<Action> = vec![
            HabitAction::add("Read", Frequency::Daily).into(),
            HabitAction::remove("1").into(),
            HabitAction::FetchPending.into(),
            HabitAction::FetchRejected { message: None }.into(),
        ];
        for action in &habit_actions {
            assert!(action.action_type().starts_with(HABITS_NAMESPACE));
            assert!(!action.is_debug());
        }

        let clear: Action = DebugAction::ClearActions.into();
        assert_eq!(clear.action_type(), CLEAR_ACTIONS);
        assert!(clear.is_debug());
    }

    #[test]
    fn toggle_payload_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let payload = HabitAction::toggle("1", date).payload().unwrap();
        assert_eq!(payload, json!({ "id": "1", "date": "2024-01-01" }));
    }

    #[test]
    fn pending_has_no_payload() {
        assert_eq!(HabitAction::FetchPending.payload(), None);
        assert_eq!(DebugAction::ClearActions.payload(), None);
    }

    #[test]
    fn rejected_payload_carries_message() {
        let action = HabitAction::FetchRejected {
            message: Some("Internal Server Error".into()),
        };
        assert_eq!(
            action.payload(),
            Some(json!({ "message": "Internal Server Error" }))
        );
    }
}
