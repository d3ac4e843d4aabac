//! Executes parsed commands against a store

use anyhow::{Context, Result};
use habit_core::{LoadOutcome, Store};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::commands::{Command, HELP};

/// What the caller should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Nothing,
    Quit,
}

/// A terminal session over one store
pub struct Session {
    store: Store,
    loads: Vec<JoinHandle<LoadOutcome>>,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            loads: Vec::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, "Executing command");

        let reply = match command {
            Command::Add { name, frequency } => {
                let id = self.store.add_habit(name, frequency);
                Reply::Print(id.to_string())
            }
            Command::Toggle { id, date } => {
                let date = date.unwrap_or_else(habit_util::today);
                self.store.toggle_completion(id, date);
                Reply::Nothing
            }
            Command::Remove { id } => {
                self.store.remove_habit(id);
                Reply::Nothing
            }
            Command::Load => {
                self.loads.retain(|handle| !handle.is_finished());
                self.loads.push(self.store.spawn_load());
                Reply::Nothing
            }
            Command::Wait => Reply::Print(self.wait_for_loads().await?),
            Command::State => Reply::Print(to_json(&self.store.habit_state())?),
            Command::Stats => Reply::Print(to_json(&self.store.stats())?),
            Command::Log { filter } => Reply::Print(to_json(&self.store.filtered_log(&filter))?),
            Command::ClearLog => {
                self.store.clear_log();
                Reply::Nothing
            }
            Command::Help => Reply::Print(HELP.to_string()),
            Command::Quit => Reply::Quit,
        };

        Ok(reply)
    }

    /// Wait for every background load, one line per outcome
    pub async fn wait_for_loads(&mut self) -> Result<String> {
        let mut lines = Vec::new();
        for handle in self.loads.drain(..) {
            let outcome = handle.await.context("Load task failed")?;
            lines.push(match outcome {
                LoadOutcome::Fulfilled { count } => format!("loaded {count} habits"),
                LoadOutcome::Rejected { error } => format!("load failed: {error}"),
            });
        }
        if lines.is_empty() {
            lines.push("no loads pending".to_string());
        }
        Ok(lines.join("\n"))
    }

    /// Stop tracking background loads; unfinished ones keep running
    pub fn shutdown(&mut self) {
        let pending = self.loads.iter().filter(|h| !h.is_finished()).count();
        if pending > 0 {
            warn!(pending, "Exiting before every load settled");
        }
        self.loads.clear();
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_config::StoreSettings;
    use habit_source::{MockSource, SourceError, StaticSource};
    use std::sync::Arc;
    use std::time::Duration;

    fn session_with(source: Arc<dyn habit_source::HabitSource>) -> Session {
        let settings = StoreSettings {
            enable_action_logging: true,
        };
        Session::new(Store::new(&settings, source))
    }

    fn printed(reply: Reply) -> String {
        match reply {
            Reply::Print(text) => text,
            other => panic!("expected output, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_prints_the_id() {
        let mut session = session_with(Arc::new(MockSource::new()));
        let id = printed(
            session
                .execute(crate::commands::parse_line("add Read").unwrap().unwrap())
                .await
                .unwrap(),
        );

        let habits = session.store().habits();
        assert_eq!(habits[0].id.as_str(), id);
    }

    #[tokio::test]
    async fn stats_and_log_are_json() {
        let mut session = session_with(Arc::new(MockSource::new()));
        session
            .execute(Command::Add {
                name: "Read".into(),
                frequency: habit_api::Frequency::Daily,
            })
            .await
            .unwrap();

        let stats: serde_json::Value =
            serde_json::from_str(&printed(session.execute(Command::Stats).await.unwrap())).unwrap();
        assert_eq!(stats["total"], 1);
        assert_eq!(stats["completedToday"], 0);

        let log: serde_json::Value = serde_json::from_str(&printed(
            session
                .execute(Command::Log {
                    filter: "add".into(),
                })
                .await
                .unwrap(),
        ))
        .unwrap();
        assert_eq!(log[0]["type"], "habits/addHabit");
    }

    #[tokio::test(start_paused = true)]
    async fn load_then_wait() {
        let mut session = session_with(Arc::new(StaticSource::new(Duration::from_millis(1000))));

        assert_eq!(session.execute(Command::Load).await.unwrap(), Reply::Nothing);
        let report = printed(session.execute(Command::Wait).await.unwrap());

        assert_eq!(report, "loaded 2 habits");
        assert_eq!(session.store().habits().len(), 2);
        assert_eq!(
            printed(session.execute(Command::Wait).await.unwrap()),
            "no loads pending"
        );
    }

    #[tokio::test]
    async fn failed_load_is_reported() {
        let source = Arc::new(MockSource::new());
        source.push_failure(SourceError::Unspecified);
        let mut session = session_with(source);

        session.execute(Command::Load).await.unwrap();
        let report = printed(session.execute(Command::Wait).await.unwrap());

        assert_eq!(report, "load failed: Failed to fetch habits");
    }

    #[tokio::test]
    async fn quit() {
        let mut session = session_with(Arc::new(MockSource::new()));
        assert_eq!(session.execute(Command::Quit).await.unwrap(), Reply::Quit);
    }
}
