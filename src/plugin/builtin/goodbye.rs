use anyhow::Result;

use crate::command::{Command, Flow, Session};
use crate::plugin::{Export, PluginEnv};

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new("GoodbyeCommand", GoodbyeCommand)])
}

pub struct GoodbyeCommand;

impl Command for GoodbyeCommand {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing GoodbyeCommand.");
        session.say("Goodbye");
        tracing::info!("GoodbyeCommand executed successfully.");
        Ok(Flow::Continue)
    }
}
