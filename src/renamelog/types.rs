use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entry::{FileEntry, FileRole};

/// Error types for rename log operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to read rename log: {0}")]
    ReadError(String),

    #[error("Failed to write rename log: {0}")]
    WriteError(String),

    #[error("Invalid log item: {role} {path} would be renamed to itself")]
    InvalidLogItem { role: FileRole, path: PathBuf },

    #[error("Rename history is unavailable: {0}")]
    HistoryUnavailable(String),
}

/// The new location of whichever pair member was renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFileEntry {
    #[serde(flatten)]
    pub entry: FileEntry,

    /// Which member of the pair this change replaces
    #[serde(alias = "type")]
    pub role: FileRole,
}

impl ChangedFileEntry {
    pub fn new(path: impl Into<PathBuf>, role: FileRole) -> Self {
        Self {
            entry: FileEntry::file(path),
            role,
        }
    }

    pub fn path(&self) -> &Path {
        &self.entry.path
    }
}

/// One committed rename: the pair as it looked beforehand, and what changed.
///
/// Fields are private so a constructed item always satisfies the
/// "renamed path differs from the original" rule, including items read back
/// from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLogItem")]
pub struct LogItem {
    video: FileEntry,
    subtitle: FileEntry,
    change: ChangedFileEntry,
}

#[derive(Deserialize)]
struct RawLogItem {
    video: FileEntry,
    subtitle: FileEntry,
    change: ChangedFileEntry,
}

impl TryFrom<RawLogItem> for LogItem {
    type Error = LogError;

    fn try_from(raw: RawLogItem) -> Result<Self, Self::Error> {
        LogItem::new(raw.video, raw.subtitle, raw.change)
    }
}

impl LogItem {
    pub fn new(
        video: FileEntry,
        subtitle: FileEntry,
        change: ChangedFileEntry,
    ) -> Result<Self, LogError> {
        let original = match change.role {
            FileRole::Video => &video.path,
            FileRole::Subtitle => &subtitle.path,
        };

        if *original == change.entry.path {
            return Err(LogError::InvalidLogItem {
                role: change.role,
                path: change.entry.path,
            });
        }

        Ok(Self {
            video,
            subtitle,
            change,
        })
    }

    pub fn video(&self) -> &FileEntry {
        &self.video
    }

    pub fn subtitle(&self) -> &FileEntry {
        &self.subtitle
    }

    pub fn change(&self) -> &ChangedFileEntry {
        &self.change
    }

    /// The pair member playing `role`, as it was before the rename
    pub fn entry_for(&self, role: FileRole) -> &FileEntry {
        match role {
            FileRole::Video => &self.video,
            FileRole::Subtitle => &self.subtitle,
        }
    }

    /// Path of the renamed member before the rename
    pub fn original_path(&self) -> &Path {
        &self.entry_for(self.change.role).path
    }

    /// Path of the renamed member after the rename
    pub fn renamed_path(&self) -> &Path {
        self.change.path()
    }
}
