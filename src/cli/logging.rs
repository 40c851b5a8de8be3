//! Log file setup
//!
//! Everything is written to a single append-only file; the terminal is kept
//! for the menus.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::storage::LoggingConfig;

/// Installs the global subscriber writing to `{dir}/{file}`.
///
/// `RUST_LOG` takes precedence over the configured level; `verbose` lowers
/// the configured level to `debug`.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    fs::create_dir_all(&config.dir)
        .with_context(|| format!("Failed to create log directory: {}", config.dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&config.file)
        .build(&config.dir)
        .with_context(|| format!("Failed to open log file in {}", config.dir.display()))?;

    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Logging configured.");
    Ok(())
}
