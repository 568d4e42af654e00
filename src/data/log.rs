//! Append-only session logging
//!
//! Two independent instances exist per game: one for lifecycle events, one
//! for caught errors. Entries are never pruned and are read only after the
//! loop ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// An append-only record of session events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The messages alone, in insertion order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }
}
