use anyhow::Result;

use super::{read_operands, report};
use crate::command::{Command, Flow, Session};

pub struct Add;

impl Command for Add {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing Add command.");
        if let Some((a, b)) = read_operands(session)? {
            report(session, "Addition", a + b);
        }
        Ok(Flow::Continue)
    }
}
