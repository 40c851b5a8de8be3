use anyhow::Result;

use crate::command::{Command, Flow, Session};

pub struct Chat;

impl Command for Chat {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Chat command executed: Engaging with AI.");
        session.say("Hi this is AI");
        Ok(Flow::Continue)
    }
}
