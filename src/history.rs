use crate::{Error, Range, Replacement};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Number of rules remembered by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// A previously used rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HistoryEntry {
    Range(Range),
    Replace(Replacement),
}

/// Most-recent-first list of used rules, capped and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for RuleHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RuleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Put `entry` at the front. An equal entry already present is moved
    /// rather than duplicated, and the oldest entries fall off past capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| *existing != entry);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Record the usable rules in application order: ranges, then replacements.
    pub fn record_rules(&mut self, ranges: &[Range], replacements: &[Replacement]) {
        for range in ranges.iter().filter(|r| r.is_active()) {
            self.record(HistoryEntry::Range(range.clone()));
        }
        for replacement in replacements.iter().filter(|r| r.is_active()) {
            self.record(HistoryEntry::Replace(replacement.clone()));
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<HistoryEntry, Error> {
        let len = self.entries.len();
        self.entries
            .remove(index)
            .ok_or(Error::HistoryIndexOutOfRange { index, len })
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load a history file. A missing file is an empty history.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;
        let mut history = Self::default();
        // Stored newest first; replay oldest first so the order survives.
        for entry in entries.into_iter().rev() {
            history.record(entry);
        }
        Ok(history)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryEntry::Range(range) => write!(f, "✂️ {range}"),
            HistoryEntry::Replace(replacement) => write!(f, "🔄 {replacement}"),
        }
    }
}
