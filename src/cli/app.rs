//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::console::StdConsole;
use super::logging;
use super::repl::{Repl, Termination};
use crate::command::HistoryRecorder;
use crate::plugin::{catalog, PluginEnv, PluginLoader};
use crate::storage::{Config, HistoryConfig, HistoryStore};

#[derive(Parser, Debug)]
#[command(name = "plugshell")]
#[command(author, version, about = "Interactive command shell assembled from plugins")]
pub struct Cli {
    /// Configuration file (defaults to ./plugshell.toml, then the global config)
    #[arg(long, short = 'c', env = "PLUGSHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    logging::init(&config.logging, cli.verbose)?;
    match &config.source {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::info!("Using default configuration"),
    }
    tracing::info!("Environment: {}", config.environment());

    let history = open_history(&config.history);

    let mut loader = PluginLoader::new();
    loader.add_root(catalog());
    for name in &config.plugins.disabled {
        loader.disable(name.clone());
    }

    let discovery = loader.discover(&PluginEnv::new(&config));
    tracing::info!(
        "Registered {} commands ({} failed, {} skipped)",
        discovery.registry.len(),
        discovery.failed.len(),
        discovery.skipped.len()
    );

    let mut repl = Repl::new(discovery.registry, history);
    let termination = repl.run(&mut StdConsole::new())?;

    match termination {
        Termination::ExitKeyword => tracing::info!("Session ended by exit keyword"),
        Termination::EndOfInput => tracing::info!("Session ended at end of input"),
        Termination::Requested { command, .. } => {
            tracing::info!("Session ended by command {}", command)
        }
    }

    Ok(())
}

/// Opens the configured history, starting empty if the file is unreadable
fn open_history(config: &HistoryConfig) -> HistoryRecorder {
    if !config.persist {
        return HistoryRecorder::in_memory(config.max_entries);
    }

    let store = HistoryStore::new(&config.file);
    match HistoryRecorder::open(store.clone(), config.max_entries) {
        Ok(history) => history,
        Err(err) => {
            tracing::error!("Failed to load history from {}: {}", store.path().display(), err);
            HistoryRecorder::with_store(store, config.max_entries)
        }
    }
}
