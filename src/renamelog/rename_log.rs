use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::storage::{FileLogStore, LogStore, StoreError};
use super::types::{LogError, LogItem};
use crate::entry::{FileEntry, FileRole};

/// Where a rename log stands with respect to its backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogState {
    /// No load attempted yet
    Unloaded,
    /// History is known (possibly empty)
    Loaded(Vec<LogItem>),
    /// The log exists but could not be read; history is unknown
    LoadFailed(String),
}

/// The record of every committed rename in one directory.
///
/// Items are kept in append order. Every change rewrites the whole log through
/// the store, so the persisted form is always a single JSON array.
#[derive(Debug)]
pub struct RenameLog<S> {
    store: S,
    state: LogState,
}

impl<S: LogStore> RenameLog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: LogState::Unloaded,
        }
    }

    /// Read the log from the store.
    ///
    /// A missing log is a first run and loads as empty history. Anything else
    /// that goes wrong leaves the log in [`LogState::LoadFailed`].
    pub fn load(&mut self) -> Result<usize, LogError> {
        match read_items(&self.store) {
            Ok(items) => {
                let count = items.len();
                info!("Loaded rename log with {} entries", count);
                self.state = LogState::Loaded(items);
                Ok(count)
            }
            Err(message) => {
                warn!(location = ?self.store.location(), "Rename log unusable: {}", message);
                self.state = LogState::LoadFailed(message.clone());
                Err(LogError::ReadError(message))
            }
        }
    }

    pub fn state(&self) -> &LogState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LogState::Loaded(_))
    }

    /// Committed items in append order
    pub fn items(&self) -> Result<&[LogItem], LogError> {
        match &self.state {
            LogState::Loaded(items) => Ok(items),
            LogState::Unloaded => Err(LogError::HistoryUnavailable(
                "rename log has not been loaded".to_string(),
            )),
            LogState::LoadFailed(message) => Err(LogError::HistoryUnavailable(message.clone())),
        }
    }

    /// Record a committed rename and persist the full log.
    ///
    /// If the write fails the item is dropped again, so memory and disk agree.
    pub fn append(&mut self, item: LogItem) -> Result<(), LogError> {
        let items = loaded_mut(&mut self.state)?;

        debug!(
            role = %item.change().role,
            from = ?item.original_path(),
            to = ?item.renamed_path(),
            "Appending to rename log"
        );

        items.push(item);

        if let Err(e) = persist(&self.store, items) {
            items.pop();
            return Err(e);
        }

        info!("Rename log now holds {} entries", items.len());
        Ok(())
    }

    /// Drop the most recent item and persist the shortened log
    pub fn remove_last(&mut self) -> Result<Option<LogItem>, LogError> {
        let items = loaded_mut(&mut self.state)?;

        let Some(item) = items.pop() else {
            return Ok(None);
        };

        if let Err(e) = persist(&self.store, items) {
            items.push(item);
            return Err(e);
        }

        info!("Removed last rename log entry, {} remaining", items.len());
        Ok(Some(item))
    }

    /// Delete the log file and start over with empty history.
    ///
    /// Allowed from any state, since this is how a corrupt log gets discarded.
    pub fn clear(&mut self) -> Result<usize, LogError> {
        self.store
            .remove()
            .map_err(|e| LogError::WriteError(e.to_string()))?;

        let removed = match &self.state {
            LogState::Loaded(items) => items.len(),
            _ => 0,
        };

        self.state = LogState::Loaded(Vec::new());
        Ok(removed)
    }

    /// The path that is authoritative for `role`, given an entry listed fresh
    /// from disk.
    ///
    /// Looks for the most recent item that renamed this role away from
    /// `entry.path`; without one the entry's own path is returned.
    pub fn resolve_path(&self, role: FileRole, entry: &FileEntry) -> Result<PathBuf, LogError> {
        Ok(resolve_in(self.items()?, role, &entry.path))
    }

    /// Resolved paths for `role` across every item, in log order
    pub fn extract_paths(&self, role: FileRole) -> Result<Vec<PathBuf>, LogError> {
        let items = self.items()?;
        Ok(items
            .iter()
            .map(|item| resolve_in(items, role, &item.entry_for(role).path))
            .collect())
    }
}

impl RenameLog<FileLogStore> {
    /// An unloaded log for the conventionally named file inside `directory`
    pub fn for_directory(directory: &Path, file_name: &str) -> Self {
        Self::new(FileLogStore::for_directory(directory, file_name))
    }
}

fn resolve_in(items: &[LogItem], role: FileRole, path: &Path) -> PathBuf {
    items
        .iter()
        .rev()
        .find(|item| item.change().role == role && item.entry_for(role).path == path)
        .map(|item| item.renamed_path().to_path_buf())
        .unwrap_or_else(|| path.to_path_buf())
}

fn loaded_mut(state: &mut LogState) -> Result<&mut Vec<LogItem>, LogError> {
    match state {
        LogState::Loaded(items) => Ok(items),
        LogState::Unloaded => Err(LogError::HistoryUnavailable(
            "rename log has not been loaded".to_string(),
        )),
        LogState::LoadFailed(message) => Err(LogError::HistoryUnavailable(message.clone())),
    }
}

fn read_items<S: LogStore>(store: &S) -> Result<Vec<LogItem>, String> {
    let contents = match store.read() {
        Ok(contents) => contents,
        Err(StoreError::NotFound(path)) => {
            debug!(path = ?path, "No rename log found, starting with empty history");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.to_string()),
    };

    serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid JSON in {}: {}", store.location().display(), e))
}

fn persist<S: LogStore>(store: &S, items: &[LogItem]) -> Result<(), LogError> {
    let contents = serde_json::to_string_pretty(items)
        .map_err(|e| LogError::WriteError(format!("Cannot serialize rename log: {}", e)))?;

    store
        .write(&contents)
        .map_err(|e| LogError::WriteError(e.to_string()))
}
