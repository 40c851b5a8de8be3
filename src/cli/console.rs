//! Console I/O for the interactive loops
//!
//! Every menu reads selections and prints through a [`Console`], so the same
//! loop code runs against the real terminal or against scripted input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented console used by the dispatch loop and every command
pub trait Console {
    /// Prints `prompt` and reads one line without its line terminator.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints one line of output
    fn write_line(&mut self, line: &str);
}

/// Console bound to the process stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(&mut self, line: &str) {
        // Output is best effort; a closed stdout must not abort the loop
        let _ = writeln!(io::stdout().lock(), "{}", line);
    }
}

/// Console that replays a fixed list of input lines and records everything
/// printed, prompts included
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: String,
}

impl ScriptedConsole {
    /// Creates a console that answers prompts with `inputs`, in order
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: String::new(),
        }
    }

    /// Everything written so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of input lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push_str(prompt);
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, line: &str) {
        self.transcript.push_str(line);
        self.transcript.push('\n');
    }
}
