//! Bounded command history
//!
//! Records are kept oldest to newest and capped at a fixed maximum; adding
//! past the cap evicts the oldest entry. Every mutation is written through to
//! the backing [`HistoryStore`] immediately.

use std::collections::VecDeque;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::HistoryStore;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid selection: no history record at position {position} ({len} recorded)")]
    InvalidSelection { position: usize, len: usize },

    #[error("Failed to persist history: {0:#}")]
    Persist(anyhow::Error),
}

/// One executed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Timestamp", with = "display_format")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "Command")]
    pub command: String,
}

impl HistoryRecord {
    pub fn new(command: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            command: command.into(),
        }
    }

    /// Timestamp in its persisted display form
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(display_format::FORMAT).to_string()
    }
}

mod display_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Bounded, persisted list of dispatched command names
#[derive(Debug)]
pub struct HistoryRecorder {
    records: VecDeque<HistoryRecord>,
    max_entries: usize,
    store: Option<HistoryStore>,
}

impl HistoryRecorder {
    /// History that lives only for this process
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            records: VecDeque::new(),
            max_entries: max_entries.max(1),
            store: None,
        }
    }

    /// Empty history that persists to `store` on the next mutation
    pub fn with_store(store: HistoryStore, max_entries: usize) -> Self {
        Self {
            store: Some(store),
            ..Self::in_memory(max_entries)
        }
    }

    /// Loads persisted history, keeping only the newest `max_entries`
    pub fn open(store: HistoryStore, max_entries: usize) -> Result<Self, HistoryError> {
        let loaded = store.read_all().map_err(HistoryError::Persist)?;
        let mut recorder = Self::with_store(store, max_entries);
        recorder.records = loaded.into();
        recorder.truncate();

        tracing::debug!("Loaded {} history records", recorder.records.len());
        Ok(recorder)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records `command` as executed now
    pub fn add(&mut self, command: &str) -> Result<(), HistoryError> {
        self.add_record(HistoryRecord::new(command, Local::now().naive_local()))
    }

    /// Appends a record, evicting the oldest past the cap
    pub fn add_record(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.records.push_back(record);
        self.truncate();
        self.save()
    }

    /// Command names, oldest first
    pub fn get(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.command.as_str()).collect()
    }

    /// Full records, oldest first
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.records.clear();
        self.save()
    }

    /// Removes the record at a 1-based display position
    pub fn delete(&mut self, position: usize) -> Result<HistoryRecord, HistoryError> {
        let len = self.records.len();
        let removed = position
            .checked_sub(1)
            .and_then(|index| self.records.remove(index))
            .ok_or(HistoryError::InvalidSelection { position, len })?;

        self.save()?;
        Ok(removed)
    }

    /// Writes the current records to the backing store, if any
    pub fn save(&self) -> Result<(), HistoryError> {
        match &self.store {
            Some(store) => {
                let records: Vec<_> = self.records.iter().cloned().collect();
                store.write_all(&records).map_err(HistoryError::Persist)
            }
            None => Ok(()),
        }
    }

    fn truncate(&mut self) {
        while self.records.len() > self.max_entries {
            self.records.pop_front();
        }
    }
}
