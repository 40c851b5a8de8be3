use anyhow::Result;

use crate::command::{Command, Flow, Session};
use crate::plugin::{Export, PluginEnv};

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new("GreetCommand", GreetCommand)])
}

pub struct GreetCommand;

impl Command for GreetCommand {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing GreetCommand.");
        session.say("Hello, World!");
        tracing::info!("GreetCommand executed successfully.");
        Ok(Flow::Continue)
    }
}
