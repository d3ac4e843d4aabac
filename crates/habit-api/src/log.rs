//! Action log entry type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Action;

/// A recorded action, as kept by the action log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Type identifier of the recorded action
    #[serde(rename = "type")]
    pub action_type: String,

    /// Opaque payload; its shape depends on the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl LogEntry {
    pub fn new(action_type: impl Into<String>, payload: Option<Value>, timestamp: i64) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
            timestamp,
        }
    }

    pub fn from_action(action: &Action, timestamp: i64) -> Self {
        Self::new(action.action_type(), action.payload(), timestamp)
    }
}

/// Keep entries whose type contains `filter`, ignoring case.
///
/// An empty filter keeps everything.
pub fn filter_log<'a>(
    entries: impl IntoIterator<Item = &'a LogEntry>,
    filter: &str,
) -> Vec<LogEntry> {
    let needle = filter.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| entry.action_type.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HabitAction;
    use serde_json::json;

    fn entries() -> Vec<LogEntry> {
        vec![
            LogEntry::new("habits/addHabit", Some(json!({ "name": "Read" })), 1),
            LogEntry::new("habits/fetchHabits/pending", None, 2),
            LogEntry::new("habits/fetchHabits/fulfilled", Some(json!([])), 3),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let all = entries();
        let fetches = filter_log(&all, "FETCHHABITS");
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[0].timestamp, 2);
        assert_eq!(fetches[1].timestamp, 3);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let all = entries();
        assert_eq!(filter_log(&all, ""), all);
    }

    #[test]
    fn from_action_copies_type_and_payload() {
        let entry = LogEntry::from_action(&HabitAction::remove("1").into(), 42);
        assert_eq!(entry.action_type, "habits/removeHabit");
        assert_eq!(entry.payload, Some(json!({ "id": "1" })));
        assert_eq!(entry.timestamp, 42);
    }

    #[test]
    fn serialized_entry_omits_missing_payload() {
        let entry = LogEntry::new("habits/fetchHabits/pending", None, 7);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, json!({ "type": "habits/fetchHabits/pending", "timestamp": 7 }));
    }
}
