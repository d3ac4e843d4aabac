//! Dispatch middleware

use habit_api::{Action, DebugAction, LogEntry};
use tracing::trace;

/// An interceptor in the dispatch path.
///
/// Middleware sees every action before the reducers do but only gets a
/// shared reference: it can observe, never alter or drop. Actions it
/// returns are dispatched through the full pipeline (middleware included)
/// ahead of the observed action, so a middleware must not answer its own
/// follow-up actions with more actions.
pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    /// Observe `action`; return any actions to dispatch first
    fn observe(&self, action: &Action) -> Vec<Action>;
}

/// Source of log timestamps, in epoch milliseconds
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    habit_util::epoch_millis(&habit_util::now())
}

/// Records every non-debug action into the action log.
///
/// Whether it records is fixed when it is built: a disabled logger is a
/// pass-through.
#[derive(Debug, Clone)]
pub struct ActionLogger {
    enabled: bool,
    clock: Clock,
}

impl ActionLogger {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            clock: system_clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn should_record(&self, action: &Action) -> bool {
        self.enabled && !action.is_debug()
    }
}

impl Middleware for ActionLogger {
    fn name(&self) -> &'static str {
        "action-logger"
    }

    fn observe(&self, action: &Action) -> Vec<Action> {
        if !self.should_record(action) {
            return Vec::new();
        }

        trace!(action_type = action.action_type(), "Recording action");
        let entry = LogEntry::from_action(action, (self.clock)());
        vec![DebugAction::LogAction(entry).into()]
    }
}
