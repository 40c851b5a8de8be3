use anyhow::Result;

use super::{read_operands, report};
use crate::command::{Command, Flow, Session};

pub struct Multiply;

impl Command for Multiply {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing Multiply command.");
        if let Some((a, b)) = read_operands(session)? {
            report(session, "Multiplication", a * b);
        }
        Ok(Flow::Continue)
    }
}
