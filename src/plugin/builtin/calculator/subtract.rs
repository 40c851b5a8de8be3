use anyhow::Result;

use super::{read_operands, report};
use crate::command::{Command, Flow, Session};

pub struct Subtract;

impl Command for Subtract {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing Subtract command.");
        if let Some((a, b)) = read_operands(session)? {
            report(session, "Subtraction", a - b);
        }
        Ok(Flow::Continue)
    }
}
