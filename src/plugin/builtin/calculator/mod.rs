//! Calculator sub-menu
//!
//! Each arithmetic operation lives in its own module and reads two operands
//! from the console.

mod add;
mod divide;
mod multiply;
mod subtract;

use anyhow::Result;

use crate::command::Session;
use crate::plugin::{CompositeMenu, Export, PluginEnv};

pub fn exports(_env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new(
        "CalculatorCommand",
        CompositeMenu::new("Calculator", operations()),
    )])
}

/// The operations offered by the calculator menu
pub fn operations() -> Vec<Export> {
    vec![
        Export::new("Add", add::Add),
        Export::new("Divide", divide::Divide),
        Export::new("Multiply", multiply::Multiply),
        Export::new("Subtract", subtract::Subtract),
    ]
}

/// Reads the two operands; `None` if input ends first
fn read_operands(session: &mut Session<'_>) -> Result<Option<(f64, f64)>> {
    let Some(a) = read_number(session, "Enter first number: ")? else {
        return Ok(None);
    };
    let Some(b) = read_number(session, "Enter second number: ")? else {
        return Ok(None);
    };
    Ok(Some((a, b)))
}

/// Prompts until the input parses as a number
fn read_number(session: &mut Session<'_>, prompt: &str) -> Result<Option<f64>> {
    loop {
        let Some(input) = session.ask(prompt)? else {
            tracing::info!("Input closed while reading an operand.");
            return Ok(None);
        };

        match input.trim().parse::<f64>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                tracing::warn!("Rejected non-numeric operand: {:?}", input);
                session.say("Invalid number, please try again.");
            }
        }
    }
}

/// Float rendering used in results: always shows a fractional part
fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

fn report(session: &mut Session<'_>, label: &str, result: f64) {
    let result = format_number(result);
    session.say(format!("The result is {}", result));
    tracing::info!("{} result: {}", label, result);
}
