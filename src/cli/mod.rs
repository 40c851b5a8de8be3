//! # Command-Line Interface
//!
//! Process entry point and the interactive loop.
//!
//! ## Flow
//!
//! 1. Parse arguments and load [`Config`](crate::storage::Config)
//! 2. Install the log file subscriber
//! 3. Open the command history and discover plugins
//! 4. Run the [`Repl`] on the terminal until the user exits
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) to log at debug level:
//! ```bash
//! plugshell --verbose
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the application.

mod app;
mod console;
mod logging;
mod repl;

pub use app::{run, Cli};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use repl::{resolve_selection, Repl, Selection, Termination, EXIT_KEYWORD};
