//! Sub-menu commands
//!
//! A [`CompositeMenu`] is a command whose execution is its own selection loop
//! over a private [`Registry`]. Operations are sorted by export name and keyed
//! `"1"`, `"2"`, ... so the listing is the same on every run; `0` returns to
//! the caller.

use anyhow::Result;

use super::source::Export;
use crate::command::{Command, Dispatch, Flow, Registry, Session};

/// Input that leaves a composite menu
pub const BACK: &str = "0";

/// A command that runs a numbered sub-menu of operations
#[derive(Debug)]
pub struct CompositeMenu {
    title: String,
    operations: Registry,
    labels: Vec<String>,
}

impl CompositeMenu {
    pub fn new(title: impl Into<String>, mut operations: Vec<Export>) -> Self {
        operations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut registry = Registry::new();
        let mut labels = Vec::with_capacity(operations.len());
        for (index, export) in operations.into_iter().enumerate() {
            registry.register((index + 1).to_string(), export.command);
            labels.push(export.name);
        }

        Self {
            title: title.into(),
            operations: registry,
            labels,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `(key, label)` pairs in display order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.operations
            .names()
            .zip(self.labels.iter().map(String::as_str))
    }

    fn label(&self, key: &str) -> Option<&str> {
        self.operations
            .index_of(key)
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
    }

    fn print_menu(&self, session: &mut Session<'_>) {
        session.say("");
        session.say(format!("{} Operations:", self.title));
        for (key, label) in self.entries() {
            session.say(format!("{}. {}", key, label));
        }
        session.say(format!("{}. Back", BACK));
    }
}

impl Command for CompositeMenu {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        loop {
            self.print_menu(session);

            let Some(choice) = session.ask("Select an operation: ")? else {
                tracing::info!("Input closed in {} menu, going back.", self.title);
                return Ok(Flow::Continue);
            };
            let choice = choice.trim();

            if choice == BACK {
                tracing::info!("User selected to go back from {} menu.", self.title);
                return Ok(Flow::Continue);
            }

            let Some(label) = self.label(choice) else {
                tracing::warn!("Invalid selection in {} menu.", self.title);
                session.say("Invalid selection. Please try again.");
                continue;
            };

            tracing::info!("Executing {} operation: {}", self.title, label);
            if let Dispatch::Completed(flow @ Flow::Exit { .. }) =
                self.operations.dispatch(choice, session)
            {
                return Ok(flow);
            }
        }
    }
}
