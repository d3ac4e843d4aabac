//! Debug slice: bounded log of recently dispatched actions

use habit_api::{DebugAction, LogEntry, filter_log};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::trace;

/// Maximum number of entries kept in the action log
pub const ACTION_LOG_CAPACITY: usize = 5;

/// State of the debug slice
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebugState {
    actions: VecDeque<LogEntry>,
}

impl DebugState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, oldest first
    pub fn actions(&self) -> impl Iterator<Item = &LogEntry> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Entries whose type contains `filter`, ignoring case
    pub fn filtered(&self, filter: &str) -> Vec<LogEntry> {
        filter_log(&self.actions, filter)
    }

    pub fn reduce(&mut self, action: DebugAction) {
        match action {
            DebugAction::LogAction(entry) => {
                if self.actions.len() >= ACTION_LOG_CAPACITY {
                    self.actions.pop_front();
                }
                trace!(action_type = %entry.action_type, "Action logged");
                self.actions.push_back(entry);
            }
            DebugAction::ClearActions => {
                self.actions.clear();
            }
        }
    }
}
