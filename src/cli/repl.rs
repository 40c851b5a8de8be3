//! Top-level dispatch loop
//!
//! Prints the numbered menu, resolves each input line to a [`Selection`],
//! dispatches registered commands, and records them in the history.

use std::num::IntErrorKind;
use std::rc::Rc;

use anyhow::Result;

use super::console::Console;
use crate::command::{display_name, Dispatch, Flow, HistoryRecorder, Registry, Session};

/// Keyword that ends the loop (case-insensitive)
pub const EXIT_KEYWORD: &str = "exit";

const INVALID_SELECTION: &str = "Invalid selection. Please enter a valid number.";
const NUMBERS_ONLY: &str = "Only numbers are allowed, wrong input.";
const UNREADABLE_INPUT: &str = "Could not read input.";

/// A resolved line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The exit keyword
    Exit,

    /// A number that maps below the first entry (`0` or negative): the menu
    /// is shown again instead of reporting an error
    Refresh,

    /// A registered command name
    Command(String),

    /// A positive number past the last entry
    OutOfRange,

    /// Anything that is not an integer
    NotANumber,
}

/// Resolves one input line against `registry`
pub fn resolve_selection(input: &str, registry: &Registry) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case(EXIT_KEYWORD) {
        return Selection::Exit;
    }

    let number = match input.parse::<i64>() {
        Ok(number) => number,
        Err(err) => {
            return match err.kind() {
                IntErrorKind::PosOverflow => Selection::OutOfRange,
                IntErrorKind::NegOverflow => Selection::Refresh,
                _ => Selection::NotANumber,
            }
        }
    };

    if number < 1 {
        return Selection::Refresh;
    }

    usize::try_from(number - 1)
        .ok()
        .and_then(|index| registry.name_at(index))
        .map_or(Selection::OutOfRange, |name| Selection::Command(name.to_string()))
}

/// Why the loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The user typed the exit keyword
    ExitKeyword,

    /// Input was exhausted
    EndOfInput,

    /// A command asked the application to stop
    Requested {
        command: String,
        reason: Option<String>,
    },
}

/// The interactive top-level loop
pub struct Repl {
    registry: Rc<Registry>,
    history: HistoryRecorder,
}

impl Repl {
    pub fn new(registry: Rc<Registry>, history: HistoryRecorder) -> Self {
        Self { registry, history }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    /// Runs until the exit keyword, end of input, or an exit request
    pub fn run(&mut self, console: &mut dyn Console) -> Result<Termination> {
        tracing::info!("Application starting...");
        self.print_menu(console);

        loop {
            let line = match console.read_line(">>> ") {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::info!("Input closed, exiting application.");
                    return Ok(Termination::EndOfInput);
                }
                Err(err) => {
                    tracing::error!("Failed to read input: {}", err);
                    console.write_line(UNREADABLE_INPUT);
                    continue;
                }
            };

            match resolve_selection(&line, &self.registry) {
                Selection::Exit => {
                    tracing::info!("Exiting application.");
                    console.write_line("Exiting application.");
                    return Ok(Termination::ExitKeyword);
                }
                Selection::Refresh => self.print_menu(console),
                Selection::Command(name) => {
                    if let Some(termination) = self.execute(&name, console) {
                        return Ok(termination);
                    }
                    self.print_menu(console);
                }
                Selection::OutOfRange => {
                    tracing::warn!("{}", INVALID_SELECTION);
                    console.write_line(INVALID_SELECTION);
                }
                Selection::NotANumber => {
                    tracing::error!("{}", NUMBERS_ONLY);
                    console.write_line(NUMBERS_ONLY);
                }
            }
        }
    }

    /// Dispatches one command; returns a termination if it asked to exit
    fn execute(&mut self, name: &str, console: &mut dyn Console) -> Option<Termination> {
        let outcome = {
            let mut session = Session::new(&mut *console, &mut self.history);
            self.registry.dispatch(name, &mut session)
        };

        let Dispatch::Completed(flow) = outcome else {
            return None;
        };

        if let Err(err) = self.history.add(name) {
            tracing::warn!("Failed to record {} in history: {}", name, err);
        }

        match flow {
            Flow::Continue => None,
            Flow::Exit { reason } => {
                if let Some(reason) = &reason {
                    console.write_line(reason);
                }
                tracing::info!("Command {} requested exit.", name);
                Some(Termination::Requested {
                    command: name.to_string(),
                    reason,
                })
            }
        }
    }

    fn print_menu(&self, console: &mut dyn Console) {
        console.write_line("");
        console.write_line("Available commands:");
        for (index, name) in self.registry.names().enumerate() {
            console.write_line(&format!("{}. {}", index + 1, display_name(name)));
        }
        console.write_line("Type the number of the command to execute, or type 'exit' to exit.");
    }
}
