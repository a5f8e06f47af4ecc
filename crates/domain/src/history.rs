//! Request History Domain Model
//!
//! Defines the structure for tracking executed requests.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::request::HttpMethod;
use crate::response::ResponseSpec;

/// Default number of history entries kept on disk.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the request completed (ISO-8601).
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// HTTP method used.
    pub method: HttpMethod,
    /// The request URL as typed.
    pub url: String,
    /// Response status code.
    pub status_code: u16,
    /// Response reason phrase.
    #[serde(default)]
    pub status_text: String,
}

impl HistoryEntry {
    /// Records a completed exchange.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        method: HttpMethod,
        url: impl Into<String>,
        response: &ResponseSpec,
    ) -> Self {
        Self {
            timestamp,
            method,
            url: url.into(),
            status_code: response.status,
            status_text: response.status_text.clone(),
        }
    }

    /// Whether the recorded status is 400 or above.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 ones, read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Request history with a maximum size limit, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHistory {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl RequestHistory {
    /// Creates a new empty history.
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Wraps entries loaded from disk, trimming to the limit.
    #[must_use]
    pub fn from_entries(entries: Vec<HistoryEntry>, max_entries: usize) -> Self {
        let mut history = Self {
            entries: entries.into(),
            max_entries,
        };
        history.entries.truncate(max_entries);
        history
    }

    /// Adds an entry to the history (at the front).
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    /// Returns the newest `n` entries.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(n)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RequestHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
