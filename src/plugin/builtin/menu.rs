//! Full-menu command
//!
//! Lists every registered command, itself included, and runs one selection.
//! `0` exits the application. The command holds a weak handle to the
//! registry it is registered in, so it is appended after discovery by
//! [`bind_menu`](crate::plugin::bind_menu) rather than discovered.

use std::rc::Weak;

use anyhow::{anyhow, Result};

use crate::command::{display_name, Command, Dispatch, Flow, Registry, Session};
use crate::plugin::{Export, PluginEnv};

/// Reason printed when the user exits from this menu
pub const EXIT_REASON: &str = "Exiting program.";

const INVALID_SELECTION: &str = "Invalid selection. Please enter a valid number.";

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Err(anyhow!("the menu command is bound to the registry after discovery"))
}

pub struct MenuCommand {
    registry: Weak<Registry>,
}

impl MenuCommand {
    pub fn new(registry: Weak<Registry>) -> Self {
        Self { registry }
    }
}

impl Command for MenuCommand {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| anyhow!("menu is no longer attached to a registry"))?;

        session.say("");
        session.say("Main Menu:");
        for (index, name) in registry.names().enumerate() {
            session.say(format!("{}. {}", index + 1, display_name(name)));
        }
        session.say("Enter the number of the command to execute, or '0' to exit.");
        tracing::info!("Displaying main menu to user.");

        let Some(input) = session.ask("Selection: ")? else {
            return Ok(Flow::Continue);
        };

        let selected = match input.trim().parse::<usize>() {
            Ok(0) => {
                tracing::info!("User selected to exit the program.");
                return Ok(Flow::exit_with(EXIT_REASON));
            }
            Ok(number) => registry.name_at(number - 1),
            Err(_) => None,
        };

        let Some(name) = selected else {
            tracing::warn!("User made an invalid selection.");
            session.say(INVALID_SELECTION);
            return Ok(Flow::Continue);
        };

        tracing::info!("User selected command: {}", name);
        match registry.dispatch(name, session) {
            Dispatch::Completed(flow) => Ok(flow),
            Dispatch::NoSuchCommand => {
                tracing::error!("Attempted to execute a non-existent command.");
                session.say("Selected command could not be executed.");
                Ok(Flow::Continue)
            }
            Dispatch::Failed(_) => Ok(Flow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedConsole;
    use crate::command::HistoryRecorder;
    use crate::plugin::bind_menu;
    use crate::testing::{with_captured_logs, Echo};
    use std::rc::Rc;

    fn registry() -> Rc<Registry> {
        let mut registry = Registry::new();
        registry.register("test", Echo::shared("Mock command executed."));
        registry.register("help", Echo::shared("Mock help executed."));
        bind_menu(registry)
    }

    fn run_menu(registry: &Rc<Registry>, inputs: &[&str]) -> (Flow, String) {
        let mut console = ScriptedConsole::new(inputs.iter().copied());
        let mut history = HistoryRecorder::in_memory(3);
        let flow = {
            let mut session = Session::new(&mut console, &mut history);
            let menu = registry.get("menu").unwrap();
            menu.execute(&mut session).unwrap()
        };
        (flow, console.transcript().to_string())
    }

    #[test]
    fn display_and_exit() {
        let registry = registry();
        let ((flow, transcript), logs) = with_captured_logs(|| run_menu(&registry, &["0"]));

        assert!(transcript.contains("\nMain Menu:\n"));
        assert!(transcript.contains("1. Test\n"));
        assert!(transcript.contains("2. Help\n"));
        assert!(transcript.contains("3. Menu\n"));
        assert!(transcript.contains("Enter the number of the command to execute, or '0' to exit."));
        assert_eq!(flow, Flow::exit_with("Exiting program."));
        assert!(logs.contains("Displaying main menu to user."));
        assert!(logs.contains("User selected to exit the program."));
    }

    #[test]
    fn invalid_selection() {
        let registry = registry();
        for input in ["999", "abc", "-1"] {
            let (flow, transcript) = run_menu(&registry, &[input]);
            assert_eq!(flow, Flow::Continue);
            assert!(transcript.contains("Invalid selection. Please enter a valid number."));
        }
    }

    #[test]
    fn valid_selection_dispatches() {
        let registry = registry();
        let (flow, transcript) = run_menu(&registry, &["2"]);

        assert_eq!(flow, Flow::Continue);
        assert!(transcript.contains("Mock help executed."));
    }

    #[test]
    fn menu_can_open_itself() {
        let registry = registry();
        let (flow, transcript) = run_menu(&registry, &["3", "0"]);

        assert_eq!(flow, Flow::exit_with("Exiting program."));
        assert_eq!(transcript.matches("Main Menu:").count(), 2);
    }

    #[test]
    fn detached_menu_reports_error() {
        let menu = MenuCommand::new(Weak::new());
        let mut console = ScriptedConsole::default();
        let mut history = HistoryRecorder::in_memory(3);

        assert!(menu
            .execute(&mut Session::new(&mut console, &mut history))
            .is_err());
    }
}
