//! plugshell - an interactive command shell assembled from plugins
//!
//! Commands are discovered from plugin groups at startup, listed in a
//! numbered menu, and dispatched by number. Every dispatched command is
//! recorded in a bounded, persisted history.

pub mod cli;
pub mod command;
pub mod plugin;
pub mod storage;

#[cfg(test)]
mod testing;

pub use command::{Command, Flow, HistoryRecorder, Registry, Session};
pub use plugin::{PluginLoader, PluginSource};
