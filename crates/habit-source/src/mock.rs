//! Mock habit source for testing

use async_trait::async_trait;
use habit_api::Habit;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::{HabitSource, SourceError, SourceResult};

/// Scriptable source for unit/integration testing.
///
/// Each fetch pops the next scripted outcome; once the script is empty it
/// falls back to `default_habits`. A gated source suspends every fetch
/// until [`MockSource::release`] lets it through, which allows tests to
/// observe the store mid-load.
pub struct MockSource {
    script: Mutex<VecDeque<SourceResult<Vec<Habit>>>>,
    default_habits: Mutex<Vec<Habit>>,
    gate: Option<Arc<Semaphore>>,
    fetch_count: AtomicU64,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_habits: Mutex::new(Vec::new()),
            gate: None,
            fetch_count: AtomicU64::new(0),
        }
    }

    /// A source whose fetches wait for [`MockSource::release`]
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    pub fn with_habits(self, habits: Vec<Habit>) -> Self {
        *self.default_habits.lock().unwrap() = habits;
        self
    }

    /// Queue the outcome of the next unscripted fetch
    pub fn push_result(&self, result: SourceResult<Vec<Habit>>) {
        self.script.lock().unwrap().push_back(result);
    }

    /// Queue a failure for the next fetch
    pub fn push_failure(&self, error: SourceError) {
        self.push_result(Err(error));
    }

    /// Let `n` suspended (or future) fetches complete
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HabitSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_habits(&self) -> SourceResult<Vec<Habit>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| SourceError::unavailable("Mock gate closed"))?;
            permit.forget();
        }

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.default_habits.lock().unwrap().clone()),
        }
    }
}
