//! Append-only, capped search history with optional JSON file persistence.
//!
//! Concurrency model: one `parking_lot::Mutex` guards the read-modify-append
//! sequence *and* the file rewrite, so concurrent searches can neither lose an
//! entry nor interleave writes. Readers take a snapshot under the same lock.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::interface::SearchHistoryEntry;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed history file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

pub struct HistoryStore {
    entries: Mutex<VecDeque<SearchHistoryEntry>>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// History kept only in memory.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            path: None,
        }
    }

    /// History backed by `path`. A missing file starts empty; a corrupt one is
    /// logged and also starts empty. Never fails.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut entries = match read_entries(&path) {
            Ok(Some(entries)) => entries,
            Ok(None) => VecDeque::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                VecDeque::new()
            }
        };
        while entries.len() > capacity {
            entries.pop_front();
        }
        tracing::debug!(path = %path.display(), entries = entries.len(), "history loaded");
        Self {
            entries: Mutex::new(entries),
            capacity,
            path: Some(path),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Append one entry, evicting the oldest past capacity, then rewrite the file.
    /// Persistence failures are logged; the in-memory append always happens.
    pub fn append(&self, entry: SearchHistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        if let Some(path) = &self.path {
            if let Err(e) = write_entries(path, &entries) {
                tracing::warn!(path = %path.display(), error = %e, "failed to persist search history");
            }
        }
    }

    /// All entries, oldest first.
    pub fn snapshot(&self) -> Vec<SearchHistoryEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Up to `limit` entries, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<SearchHistoryEntry> {
        self.entries.lock().iter().rev().take(limit).cloned().collect()
    }

    /// The entry `index` positions back from the most recent (0 = latest).
    pub fn get_recent(&self, index: usize) -> Option<SearchHistoryEntry> {
        self.entries.lock().iter().rev().nth(index).cloned()
    }
}

fn read_entries(path: &Path) -> HistoryResult<Option<VecDeque<SearchHistoryEntry>>> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_slice(&raw)?))
}

/// Whole-file rewrite through a sibling temp file so readers never see a torn file.
fn write_entries(path: &Path, entries: &VecDeque<SearchHistoryEntry>) -> HistoryResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
