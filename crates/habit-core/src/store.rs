//! The store: owned state, the dispatch pipeline, and the async load

use chrono::NaiveDate;
use habit_api::{Action, DebugAction, Frequency, Habit, HabitAction, HabitStats, LogEntry};
use habit_config::StoreSettings;
use habit_source::HabitSource;
use habit_util::HabitId;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    ActionLogger, DebugState, FETCH_ERROR_FALLBACK, HabitState, Middleware, StatsSelector,
};

/// Combined state of every slice
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootState {
    pub habits: HabitState,
    pub debug: DebugState,
}

/// How a load settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Fulfilled { count: usize },
    Rejected { error: String },
}

/// What the debug panel shows: filtered actions plus the habit state
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    pub actions: Vec<LogEntry>,
    pub state: HabitState,
}

struct Inner {
    state: RootState,
    stats: StatsSelector,
}

/// Handle to one habit store.
///
/// Cloning is cheap and every clone sees the same state. Each action is
/// applied under a short lock that is never held across an `.await`, so
/// a load in flight doesn't block reads or other dispatches.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<Inner>>,
    middleware: Arc<Vec<Box<dyn Middleware>>>,
    source: Arc<dyn HabitSource>,
    revision: Arc<watch::Sender<u64>>,
    loads_in_flight: Arc<AtomicUsize>,
}

impl Store {
    /// Create a store with the action logger gated by `settings`
    pub fn new(settings: &StoreSettings, source: Arc<dyn HabitSource>) -> Self {
        Self::builder(source)
            .middleware(ActionLogger::new(settings.enable_action_logging))
            .build()
    }

    pub fn builder(source: Arc<dyn HabitSource>) -> StoreBuilder {
        StoreBuilder {
            source,
            middleware: Vec::new(),
            initial: RootState::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `action` through the middleware, then the reducers
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();

        for middleware in self.middleware.iter() {
            for follow_up in middleware.observe(&action) {
                self.dispatch(follow_up);
            }
        }

        self.reduce(action);
    }

    fn reduce(&self, action: Action) {
        let action_type = action.action_type();
        {
            let mut inner = self.lock();
            match action {
                Action::Habits(action) => inner.state.habits.reduce(action),
                Action::Debug(action) => inner.state.debug.reduce(action),
            }
        }

        self.revision.send_modify(|revision| *revision += 1);
        debug!(action_type, "Action reduced");
    }

    // Commands

    /// Add a habit and return its new id. The name is not validated.
    pub fn add_habit(&self, name: impl Into<String>, frequency: Frequency) -> HabitId {
        let (id, action) = HabitAction::add_with_id(name, frequency);
        self.dispatch(action);
        id
    }

    pub fn toggle_completion(&self, id: impl Into<HabitId>, date: NaiveDate) {
        self.dispatch(HabitAction::toggle(id, date));
    }

    pub fn remove_habit(&self, id: impl Into<HabitId>) {
        self.dispatch(HabitAction::remove(id));
    }

    pub fn append_log_entry(&self, entry: LogEntry) {
        self.dispatch(DebugAction::LogAction(entry));
    }

    pub fn clear_log(&self) {
        self.dispatch(DebugAction::ClearActions);
    }

    /// Fetch habits from the source: pending, then fulfilled or rejected.
    ///
    /// The fetch runs as its own task, so dropping this future stops the
    /// wait but not the load: it still settles. Overlapping loads are not
    /// coordinated; whichever settles last determines the final state.
    /// There is no timeout.
    pub async fn load_habits(&self) -> LoadOutcome {
        match self.spawn_load().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Load task ended without settling");
                LoadOutcome::Rejected {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Issue a load and return at once. `FetchPending` is applied before
    /// this returns; the rest happens on the spawned task.
    pub fn spawn_load(&self) -> JoinHandle<LoadOutcome> {
        let guard = InFlightLoad::enter(&self.loads_in_flight);
        if guard.count > 1 {
            warn!(
                in_flight = guard.count,
                "Load started while another is pending; last to settle wins"
            );
        }
        info!(source = self.source.name(), "Loading habits");
        self.dispatch(HabitAction::FetchPending);

        let store = self.clone();
        tokio::spawn(async move { store.settle_load(guard).await })
    }

    async fn settle_load(&self, guard: InFlightLoad) -> LoadOutcome {
        let result = self.source.fetch_habits().await;
        drop(guard);

        match result {
            Ok(habits) => {
                let count = habits.len();
                self.dispatch(HabitAction::FetchFulfilled { habits });
                info!(count, "Habits loaded");
                LoadOutcome::Fulfilled { count }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load habits");
                let error = e
                    .message()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FETCH_ERROR_FALLBACK.to_string());
                self.dispatch(HabitAction::FetchRejected {
                    message: Some(error.clone()),
                });
                LoadOutcome::Rejected { error }
            }
        }
    }

    // Queries

    pub fn state(&self) -> RootState {
        self.lock().state.clone()
    }

    pub fn habit_state(&self) -> HabitState {
        self.lock().state.habits.clone()
    }

    pub fn habits(&self) -> Arc<Vec<Habit>> {
        crate::select_habits(&self.lock().state.habits)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.habits.is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().state.habits.error.clone()
    }

    /// Stats as of today
    pub fn stats(&self) -> HabitStats {
        self.stats_on(habit_util::today())
    }

    /// Stats as of `today`, memoized on the habit collection
    pub fn stats_on(&self, today: NaiveDate) -> HabitStats {
        let mut inner = self.lock();
        let habits = inner.state.habits.habits.clone();
        inner.stats.select(&habits, today)
    }

    /// Number of times stats were actually recomputed
    pub fn stats_recomputations(&self) -> u64 {
        self.lock().stats.recomputations()
    }

    /// Action log, oldest first
    pub fn action_log(&self) -> Vec<LogEntry> {
        self.lock().state.debug.actions().cloned().collect()
    }

    /// Action log entries whose type contains `filter`, ignoring case
    pub fn filtered_log(&self, filter: &str) -> Vec<LogEntry> {
        self.lock().state.debug.filtered(filter)
    }

    pub fn debug_snapshot(&self, filter: &str) -> DebugSnapshot {
        let inner = self.lock();
        DebugSnapshot {
            actions: inner.state.debug.filtered(filter),
            state: inner.state.habits.clone(),
        }
    }

    /// Watch the revision counter, bumped after every reduced action
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

/// Counts a load as in flight until dropped
struct InFlightLoad {
    counter: Arc<AtomicUsize>,
    count: usize,
}

impl InFlightLoad {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            counter: counter.clone(),
            count,
        }
    }
}

impl Drop for InFlightLoad {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Builder for [`Store`]
pub struct StoreBuilder {
    source: Arc<dyn HabitSource>,
    middleware: Vec<Box<dyn Middleware>>,
    initial: RootState,
}

impl StoreBuilder {
    /// Append a middleware; middleware run in the order added
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Start from a preloaded habits slice instead of the empty one
    pub fn initial_habits(mut self, habits: HabitState) -> Self {
        self.initial.habits = habits;
        self
    }

    pub fn build(self) -> Store {
        let names: Vec<_> = self.middleware.iter().map(|m| m.name()).collect();
        info!(
            source = self.source.name(),
            middleware = ?names,
            "Store initialized"
        );

        let (revision, _) = watch::channel(0);
        Store {
            inner: Arc::new(Mutex::new(Inner {
                state: self.initial,
                stats: StatsSelector::new(),
            })),
            middleware: Arc::new(self.middleware),
            source: self.source,
            revision: Arc::new(revision),
            loads_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}
