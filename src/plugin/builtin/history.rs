//! Command history sub-menu
//!
//! Operates on the session's [`HistoryRecorder`](crate::command::HistoryRecorder);
//! every change is persisted by the recorder itself.

use anyhow::Result;

use crate::command::{Command, Flow, HistoryError, Session};
use crate::plugin::{CompositeMenu, Export, PluginEnv};

const INVALID_SELECTION: &str = "Invalid selection. Please enter a valid number.";

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new(
        "HistoryCommand",
        CompositeMenu::new("Command History", operations()),
    )])
}

pub fn operations() -> Vec<Export> {
    vec![
        Export::new("Clear History", ClearHistory),
        Export::new("Delete History Record", DeleteHistoryRecord),
        Export::new("Load History", LoadHistory),
        Export::new("Save History", SaveHistory),
    ]
}

fn print_history(session: &mut Session<'_>) {
    let lines: Vec<String> = session
        .history
        .records()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "{}. {} ({})",
                index + 1,
                record.command,
                record.display_timestamp()
            )
        })
        .collect();

    if lines.is_empty() {
        session.say("No command history found.");
        return;
    }

    session.say("Command History:");
    for line in lines {
        session.say(line);
    }
}

struct LoadHistory;

impl Command for LoadHistory {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Displaying command history.");
        print_history(session);
        Ok(Flow::Continue)
    }
}

struct SaveHistory;

impl Command for SaveHistory {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        session.history.save()?;
        tracing::info!("History saved.");
        session.say("History saved successfully.");
        Ok(Flow::Continue)
    }
}

struct ClearHistory;

impl Command for ClearHistory {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        session.history.clear()?;
        tracing::info!("History cleared.");
        session.say("History cleared successfully.");
        Ok(Flow::Continue)
    }
}

struct DeleteHistoryRecord;

impl Command for DeleteHistoryRecord {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        print_history(session);
        if session.history.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(input) = session.ask("Enter the number of the record to delete: ")? else {
            return Ok(Flow::Continue);
        };

        let position = input.trim().parse::<usize>().unwrap_or(0);
        match session.history.delete(position) {
            Ok(record) => {
                tracing::info!("Deleted history record {}: {}", position, record.command);
                session.say("History record deleted successfully.");
            }
            Err(HistoryError::InvalidSelection { .. }) => {
                tracing::warn!("Invalid history record selection: {:?}", input);
                session.say(INVALID_SELECTION);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }
}
