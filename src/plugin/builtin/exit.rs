//! Exit command
//!
//! Asks the dispatch loop to stop; the process then exits with status 0.

use anyhow::Result;

use crate::command::{Command, Flow, Session};
use crate::plugin::{Export, PluginEnv};

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new("ExitCommand", ExitCommand)])
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing ExitCommand - Application exiting...");
        session.say("Exiting...");
        Ok(Flow::exit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedConsole;
    use crate::command::HistoryRecorder;

    #[test]
    fn exit_requests_termination() {
        let mut console = ScriptedConsole::default();
        let mut history = HistoryRecorder::in_memory(3);
        let flow = ExitCommand
            .execute(&mut Session::new(&mut console, &mut history))
            .unwrap();

        assert_eq!(flow, Flow::exit());
        assert_eq!(console.transcript(), "Exiting...\n");
    }
}
