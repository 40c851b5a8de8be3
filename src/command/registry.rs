//! Ordered command registry
//!
//! Insertion order is display order: the numbered menus are built by
//! enumerating [`Registry::names`], and numeric selections are resolved with
//! [`Registry::name_at`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use super::{panic_message, Command, Flow, Session};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    Duplicate(String),
}

/// Result of dispatching a command by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran and returned normally
    Completed(Flow),

    /// No command is registered under that name
    NoSuchCommand,

    /// The command returned an error or panicked; the message was reported
    Failed(String),
}

/// Ordered mapping from command name to command
#[derive(Clone, Default)]
pub struct Registry {
    commands: IndexMap<String, Rc<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` under `name`.
    ///
    /// An existing entry is replaced in place: last write wins and the name
    /// keeps its original position.
    pub fn register(&mut self, name: impl Into<String>, command: Rc<dyn Command>) {
        self.commands.insert(name.into(), command);
    }

    /// Registers `command`, refusing to replace an existing entry
    pub fn register_strict(
        &mut self,
        name: impl Into<String>,
        command: Rc<dyn Command>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.commands.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.commands.insert(name, command);
        Ok(())
    }

    /// Names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Name at a 0-based position
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.commands.get_index(index).map(|(name, _)| name.as_str())
    }

    /// 0-based position of a name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.commands.get_index_of(name)
    }

    pub fn get(&self, name: &str) -> Option<&Rc<dyn Command>> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs the command registered under `name`.
    ///
    /// Unknown names, errors and panics are reported to the user and logged;
    /// none of them propagate to the caller.
    pub fn dispatch(&self, name: &str, session: &mut Session<'_>) -> Dispatch {
        let Some(command) = self.commands.get(name) else {
            tracing::warn!("No such command: {}", name);
            session.say(format!("No such command: {}", name));
            return Dispatch::NoSuchCommand;
        };

        tracing::debug!("Dispatching command: {}", name);

        match panic::catch_unwind(AssertUnwindSafe(|| command.execute(session))) {
            Ok(Ok(flow)) => Dispatch::Completed(flow),
            Ok(Err(err)) => {
                let message = format!("{:#}", err);
                tracing::error!("Command {} failed: {}", name, message);
                session.say(format!("Command '{}' failed: {}", name, message));
                Dispatch::Failed(message)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("Command {} panicked: {}", name, message);
                session.say(format!("Command '{}' failed: {}", name, message));
                Dispatch::Failed(message)
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Menu form of a registered name: first letter upper-cased, rest lower-cased
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
