//! Shared fixtures for unit tests

use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::command::{Command, Flow, Session};

/// Prints a fixed line and continues
pub struct Echo(pub &'static str);

impl Echo {
    pub fn shared(line: &'static str) -> Rc<dyn Command> {
        Rc::new(Echo(line))
    }
}

impl Command for Echo {
    fn execute(&self, session: &mut Session<'_>) -> anyhow::Result<Flow> {
        session.say(self.0);
        Ok(Flow::Continue)
    }
}

/// Always returns an error
pub struct Failing;

impl Command for Failing {
    fn execute(&self, _session: &mut Session<'_>) -> anyhow::Result<Flow> {
        anyhow::bail!("deliberate failure")
    }
}

/// Always panics
pub struct Panicking;

impl Command for Panicking {
    fn execute(&self, _session: &mut Session<'_>) -> anyhow::Result<Flow> {
        panic!("deliberate panic")
    }
}

/// Requests application exit
pub struct Quits;

impl Command for Quits {
    fn execute(&self, _session: &mut Session<'_>) -> anyhow::Result<Flow> {
        Ok(Flow::exit_with("stopping"))
    }
}

/// In-memory sink for `tracing` output
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result and the
/// captured log text
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}
