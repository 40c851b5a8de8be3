//! Chat sub-menu
//!
//! Canned replies only; nothing here talks to a network service.

mod chat;

use anyhow::Result;

use crate::plugin::{CompositeMenu, Export, PluginEnv};

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new(
        "OpenAICommand",
        CompositeMenu::new("OPEN AI", operations()),
    )])
}

pub fn operations() -> Vec<Export> {
    vec![Export::new("Chat", chat::Chat)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedConsole;
    use crate::command::{Command, Flow, HistoryRecorder, Session};
    use crate::testing::with_captured_logs;

    fn run(inputs: &[&str]) -> (String, String) {
        let mut console = ScriptedConsole::new(inputs.iter().copied());
        let mut history = HistoryRecorder::in_memory(3);
        let menu = CompositeMenu::new("OPEN AI", operations());
        let (flow, logs) = with_captured_logs(|| {
            menu.execute(&mut Session::new(&mut console, &mut history))
                .unwrap()
        });
        assert_eq!(flow, Flow::Continue);
        (console.transcript().to_string(), logs)
    }

    #[test]
    fn display_and_back() {
        let (transcript, _) = run(&["0"]);

        assert!(transcript.contains("OPEN AI Operations:"));
        assert!(transcript.contains("1. Chat"));
        assert!(transcript.contains("0. Back"));
    }

    #[test]
    fn chat_replies() {
        let (transcript, logs) = run(&["1", "0"]);

        assert!(transcript.contains("Hi this is AI"));
        assert!(logs.contains("Chat command executed: Engaging with AI."));
    }
}
