//! Parsing of input lines into commands

use chrono::NaiveDate;
use habit_api::Frequency;
use habit_util::{HabitError, HabitId, Result};

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { name: String, frequency: Frequency },
    /// `date` is `None` for today
    Toggle { id: HabitId, date: Option<NaiveDate> },
    Remove { id: HabitId },
    Load,
    Wait,
    State,
    Stats,
    Log { filter: String },
    ClearLog,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name...> [--weekly|--daily]   add a habit (daily by default)
  toggle <id> [YYYY-MM-DD]           toggle completion (today by default)
  remove <id>                        remove a habit
  load                               load habits from the source in the background
  wait                               wait for background loads to finish
  state                              print the habits state
  stats                              print habit statistics
  log [filter]                       print the action log
  clear-log                          clear the action log
  help                               show this message
  quit                               exit";

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => parse_add(&args)?,
        "toggle" => {
            let id = required(&args, 0, "habit id")?;
            let date = args
                .get(1)
                .map(|value| habit_util::parse_date(value))
                .transpose()?;
            Command::Toggle {
                id: HabitId::new(id),
                date,
            }
        }
        "remove" | "rm" => Command::Remove {
            id: HabitId::new(required(&args, 0, "habit id")?),
        },
        "load" => Command::Load,
        "wait" => Command::Wait,
        "state" => Command::State,
        "stats" => Command::Stats,
        "log" => Command::Log {
            filter: args.join(" "),
        },
        "clear-log" => Command::ClearLog,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(HabitError::unknown_command(other)),
    };

    Ok(Some(command))
}

fn parse_add(args: &[&str]) -> Result<Command> {
    let mut frequency = Frequency::Daily;
    let mut name = Vec::new();

    for arg in args {
        match *arg {
            "--weekly" => frequency = Frequency::Weekly,
            "--daily" => frequency = Frequency::Daily,
            _ => match arg.strip_prefix("--frequency=") {
                Some(value) => frequency = value.parse()?,
                None => name.push(*arg),
            },
        }
    }

    if name.is_empty() {
        return Err(HabitError::EmptyName);
    }

    Ok(Command::Add {
        name: name.join(" "),
        frequency,
    })
}

fn required<'a>(args: &[&'a str], index: usize, what: &'static str) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or(HabitError::MissingArgument(what))
}
