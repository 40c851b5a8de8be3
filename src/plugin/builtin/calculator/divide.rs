use anyhow::Result;

use super::{read_operands, report};
use crate::command::{Command, Flow, Session};

pub struct Divide;

impl Command for Divide {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        tracing::info!("Executing Divide command.");
        let Some((a, b)) = read_operands(session)? else {
            return Ok(Flow::Continue);
        };

        // Checked up front; a zero divisor never reaches the division
        if b == 0.0 {
            tracing::warn!("Attempted division by zero.");
            session.say("Cannot divide by zero. Please enter a valid second number.");
        } else {
            report(session, "Division", a / b);
        }
        Ok(Flow::Continue)
    }
}
