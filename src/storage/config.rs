//! Configuration handling for plugshell
//!
//! Configuration is read from the first of: an explicit path (`--config` or
//! `PLUGSHELL_CONFIG`), `./plugshell.toml`, and
//! `~/.config/plugshell/config.toml`. Missing files mean defaults.
//! Process environment variables are captured alongside.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "plugshell.toml";

/// Environment key naming the deployment environment
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// Value of [`ENVIRONMENT_KEY`] when the process does not set it
pub const DEFAULT_ENVIRONMENT: &str = "PRODUCTION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory holding the log file (created on startup)
    pub dir: PathBuf,

    /// Log file name inside `dir`
    pub file: String,

    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file: "app.log".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Command history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of records kept
    pub max_entries: usize,

    /// CSV file the history is persisted to
    pub file: PathBuf,

    /// Keep history across runs
    pub persist: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 10,
            file: PathBuf::from("data").join("history.csv"),
            persist: true,
        }
    }
}

/// Plugin discovery settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Plugin groups skipped during discovery
    pub disabled: Vec<String>,
}

/// Settings for the CSV report plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub data_dir: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,

    /// Column the rows are sorted by
    pub sort_by: String,

    /// Columns kept in the output, in output order
    pub columns: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            input: data_dir.join("gpt_states.csv"),
            output: data_dir.join("sorted_states.csv"),
            data_dir,
            sort_by: "Population".to_string(),
            columns: vec![
                "State Abbreviation".to_string(),
                "State Name".to_string(),
                "Population".to_string(),
            ],
        }
    }
}

/// Combined configuration (file settings + captured environment)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub history: HistoryConfig,
    pub plugins: PluginsConfig,
    pub csv: CsvConfig,

    /// File the settings were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,

    #[serde(skip)]
    environment: BTreeMap<String, String>,
}

impl Config {
    /// Loads configuration from an explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        let config = config.with_environment(std::env::vars());
        config.validate()?;
        Ok(config)
    }

    /// Loads settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "plugshell", "plugshell")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// First existing config file among the default locations
    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        Self::global_config_dir()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Replaces the captured environment, defaulting `ENVIRONMENT`
    pub fn with_environment<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.environment
            .entry(ENVIRONMENT_KEY.to_string())
            .or_insert_with(|| DEFAULT_ENVIRONMENT.to_string());
        self
    }

    /// Looks up a captured environment variable
    pub fn environment_variable(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// The deployment environment (`ENVIRONMENT`, default `PRODUCTION`)
    pub fn environment(&self) -> &str {
        self.environment_variable(ENVIRONMENT_KEY)
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Rejects settings the application cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "history.max_entries must be at least 1".to_string(),
            ));
        }

        if self.logging.file.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.file must not be empty".to_string()));
        }

        Ok(())
    }
}
