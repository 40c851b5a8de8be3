//! CSV storage for command history
//!
//! History is stored as a two-column table (`Timestamp`, `Command`) and
//! rewritten wholesale on every change. Uses file locking for concurrent
//! access safety.

use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::command::HistoryRecord;

const HEADER: [&str; 2] = ["Timestamp", "Command"];

/// Store for history records in CSV format
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a new history store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records, oldest first
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;

        // Acquire shared lock for reading
        FileExt::lock_shared(&file).context("Failed to acquire read lock on history file")?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(&file);

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<HistoryRecord>().enumerate() {
            let record = result
                .with_context(|| format!("Failed to parse history record at row {}", row + 1))?;
            records.push(record);
        }

        // Lock is released when file is dropped
        Ok(records)
    }

    /// Writes all records to the store (full rewrite)
    pub fn write_all(&self, records: &[HistoryRecord]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("csv.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            FileExt::lock_exclusive(&file)
                .context("Failed to acquire write lock on history file")?;

            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(BufWriter::new(&file));

            // Header is written explicitly so an empty history still has one
            writer.write_record(HEADER).context("Failed to write history header")?;
            for record in records {
                writer.serialize(record).context("Failed to write history record")?;
            }

            writer.flush().context("Failed to flush history file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(command: &str, second: u32) -> HistoryRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, second)
            .unwrap();
        HistoryRecord::new(command, timestamp)
    }

    #[test]
    fn read_missing_store() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn write_uses_tabular_layout() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("data").join("history.csv"));

        store.write_all(&[record("greet", 1), record("exit", 2)]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "Timestamp,Command\n2024-01-15 09:30:01,greet\n2024-01-15 09:30:02,exit\n"
        );
    }

    #[test]
    fn empty_write_keeps_header() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        store.write_all(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "Timestamp,Command\n");
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn write_then_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        let records = vec![record("menu", 5), record("greet", 3), record("csv", 9)];

        store.write_all(&records).unwrap();

        assert_eq!(store.read_all().unwrap(), records);
    }

    #[test]
    fn corrupt_row_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "Timestamp,Command\nyesterday,greet\n").unwrap();

        let err = HistoryStore::new(&path).read_all().unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        store.write_all(&[record("greet", 0)]).unwrap();

        assert!(!dir.path().join("history.csv.tmp").exists());
    }
}
