//! # Storage Layer
//!
//! Configuration and on-disk persistence.
//!
//! ## Storage Formats
//!
//! | Data | Format | Default Location |
//! |------|--------|------------------|
//! | Config | TOML | `./plugshell.toml` or `~/.config/plugshell/config.toml` |
//! | History | CSV (`Timestamp`, `Command`) | `data/history.csv` |
//! | Logs | Plain text | `logs/app.log` |
//!
//! ## Concurrency Safety
//!
//! - [`HistoryStore`] uses file locking (`fs2`) and writes atomically
//!   (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Config`] - File settings plus the captured process environment
//! - [`HistoryStore`] - Read/write history records as CSV

mod config;
mod history_store;

pub use config::{
    Config, ConfigError, CsvConfig, HistoryConfig, LoggingConfig, PluginsConfig,
    DEFAULT_ENVIRONMENT, ENVIRONMENT_KEY, LOCAL_CONFIG_FILE,
};
pub use history_store::HistoryStore;
