use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::HistoryError;
use crate::models::{HistoryEntry, Value};

/// Bounded evaluation history, optionally backed by a JSON file
#[derive(Debug)]
pub struct HistoryManager {
    /// Backing file; `None` keeps history in memory only
    history_file: Option<PathBuf>,
    /// Entries, oldest first
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of entries kept
    limit: usize,
}

impl HistoryManager {
    /// Create an in-memory history
    pub fn new(limit: usize) -> Self {
        Self {
            history_file: None,
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Open a file-backed history, loading existing entries if the file exists
    pub fn open(history_file: &Path, limit: usize) -> Result<Self, HistoryError> {
        let mut manager = Self {
            history_file: Some(history_file.to_path_buf()),
            entries: VecDeque::new(),
            limit,
        };
        manager.load()?;
        Ok(manager)
    }

    fn load(&mut self) -> Result<(), HistoryError> {
        let Some(path) = self.history_file.clone() else {
            return Ok(());
        };
        if !path.exists() {
            debug!("History file does not exist, starting fresh");
            return Ok(());
        }

        let content =
            fs::read_to_string(&path).map_err(|e| HistoryError::ReadError(path.clone(), e))?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)
            .map_err(|e| HistoryError::ParseError(path.clone(), e.to_string()))?;
        self.entries = entries.into();
        self.truncate();
        info!("Loaded {} history entries", self.entries.len());
        Ok(())
    }

    /// Save history to its file atomically (write to temp, then rename).
    /// In-memory histories are left untouched.
    pub fn save(&self) -> Result<(), HistoryError> {
        let Some(path) = &self.history_file else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| HistoryError::ParseError(path.clone(), e.to_string()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| HistoryError::WriteError(parent.to_path_buf(), e))?;
            }
        }

        let temp_file = path.with_extension("json.tmp");
        fs::write(&temp_file, &json).map_err(|e| HistoryError::WriteError(temp_file.clone(), e))?;
        fs::rename(&temp_file, path).map_err(|e| HistoryError::WriteError(path.clone(), e))?;

        debug!("Saved {} history entries", self.entries.len());
        Ok(())
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.truncate();
    }

    pub fn record_success(&mut self, expression: &str, result: Value) {
        self.record(HistoryEntry::success(expression.trim(), result));
    }

    pub fn record_failure(&mut self, expression: &str, error: &str) {
        self.record(HistoryEntry::failure(expression.trim(), error));
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn path(&self) -> Option<&Path> {
        self.history_file.as_deref()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }
}
