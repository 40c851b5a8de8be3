//! # Commands
//!
//! The capability every menu entry implements, plus the two structures the
//! dispatch engine is built on.
//!
//! ## Key Types
//!
//! - [`Command`] - The single-operation capability (`execute`)
//! - [`Flow`] - What the caller should do after a command returns
//! - [`Session`] - Console and history handed to a running command
//! - [`Registry`] - Ordered name to command mapping with positional lookup
//! - [`HistoryRecorder`] - Bounded, persisted record of dispatched commands
//!
//! ## Termination
//!
//! Commands never end the process themselves. A command that wants the
//! application to stop returns [`Flow::Exit`], which every enclosing loop
//! passes outward until the top-level loop returns to `main`.

mod history;
mod registry;

use std::any::Any;
use std::io;

pub use history::{HistoryError, HistoryRecord, HistoryRecorder};
pub use registry::{display_name, Dispatch, Registry, RegistryError};

use crate::cli::Console;

/// A unit of behavior that can be selected from a menu
pub trait Command {
    /// Runs the command to completion.
    ///
    /// Errors are contained by [`Registry::dispatch`]; they are reported to
    /// the user and never stop the calling loop.
    fn execute(&self, session: &mut Session<'_>) -> anyhow::Result<Flow>;
}

/// Control flow requested by a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Return to the calling menu
    Continue,

    /// Stop the whole application, optionally printing a reason first
    Exit { reason: Option<String> },
}

impl Flow {
    /// Exit request without a message
    pub fn exit() -> Self {
        Flow::Exit { reason: None }
    }

    /// Exit request that prints `reason` before terminating
    pub fn exit_with(reason: impl Into<String>) -> Self {
        Flow::Exit {
            reason: Some(reason.into()),
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Flow::Exit { .. })
    }
}

/// Resources available to a running command
pub struct Session<'a> {
    pub console: &'a mut dyn Console,
    pub history: &'a mut HistoryRecorder,
}

impl<'a> Session<'a> {
    pub fn new(console: &'a mut dyn Console, history: &'a mut HistoryRecorder) -> Self {
        Self { console, history }
    }

    /// Prints a line to the user
    pub fn say(&mut self, line: impl AsRef<str>) {
        self.console.write_line(line.as_ref());
    }

    /// Prompts and reads one line; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.console.read_line(prompt)
    }
}

/// Renders a caught panic payload as text
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
