//! habits - terminal front end for the habit tracker
//!
//! Wires together:
//! - Configuration loading and flag overrides
//! - The habit source selected by the configuration
//! - The store with its action logger
//! - A command loop over stdin

mod commands;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use habit_config::{Settings, SourceSettings, load_config_or_default};
use habit_core::Store;
use habit_source::{FileSource, HabitSource, StaticSource};
use habit_util::default_config_path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::session::{Reply, Session};

/// habits - track habits and completion streaks
#[derive(Parser, Debug)]
#[command(name = "habits")]
#[command(about = "Track habits and completion streaks", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/habits/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Record dispatched actions regardless of the configuration
    #[arg(long, conflicts_with = "disable_action_logging")]
    enable_action_logging: bool,

    /// Never record dispatched actions
    #[arg(long)]
    disable_action_logging: bool,

    /// Start loading habits as soon as the store is ready
    #[arg(long, env = "HABITS_LOAD_ON_START")]
    load_on_start: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = load_config_or_default(&self.config)
            .with_context(|| format!("Failed to load config from {:?}", self.config))?;

        if self.enable_action_logging {
            settings.store.enable_action_logging = true;
        } else if self.disable_action_logging {
            settings.store.enable_action_logging = false;
        }

        Ok(settings)
    }
}

fn build_source(settings: &SourceSettings) -> Arc<dyn HabitSource> {
    match settings {
        SourceSettings::Static { delay } => Arc::new(StaticSource::new(*delay)),
        SourceSettings::File { path } => Arc::new(FileSource::new(path.clone())),
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = args.settings()?;
    info!(
        config_path = %args.config.display(),
        action_logging = settings.store.enable_action_logging,
        source = ?settings.source,
        "Configuration loaded"
    );

    let store = Store::new(&settings.store, build_source(&settings.source));
    let mut session = Session::new(store);

    if args.load_on_start {
        session.execute(commands::Command::Load).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received interrupt, shutting down");
                break;
            }
        };

        // EOF
        let Some(line) = line else {
            break;
        };

        let command = match commands::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Reply::Print(text)) => println!("{text}"),
            Ok(Reply::Nothing) => {}
            Ok(Reply::Quit) => break,
            Err(e) => {
                error!(error = %e, "Command failed");
                eprintln!("error: {e:#}");
            }
        }
    }

    session.shutdown();
    if session.store().is_loading() {
        warn!("Exiting with a load still pending");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries command output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "habits starting");

    run(args).await
}
