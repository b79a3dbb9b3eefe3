use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which half of a video/subtitle pair a file plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Video,
    Subtitle,
}

impl FileRole {
    pub fn description(&self) -> &'static str {
        match self {
            FileRole::Video => "video",
            FileRole::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A single record from a directory listing.
///
/// `children` is only ever present for directories; its presence is what
/// makes an entry a directory, even when the list itself is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path to the entry
    pub path: PathBuf,

    /// Base name including extension
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileEntry>>,
}

impl FileEntry {
    /// Create a leaf (file) entry, deriving the name from the path
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self {
            path,
            name,
            children: None,
        }
    }

    /// Create a directory entry with the given children
    pub fn directory(path: impl Into<PathBuf>, children: Vec<FileEntry>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self {
            path,
            name,
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
