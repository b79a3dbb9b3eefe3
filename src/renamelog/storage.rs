use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Error types for reading and writing raw log contents
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Log file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Backing storage for a rename log's UTF-8 text.
///
/// `read` must report a missing log as [`StoreError::NotFound`] so callers can
/// tell a first run apart from a broken file.
pub trait LogStore {
    /// Where the log lives, for messages
    fn location(&self) -> &Path;

    fn read(&self) -> Result<String, StoreError>;

    /// Replace the whole log with `contents`
    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Delete the log. A log that is already absent is not an error.
    fn remove(&self) -> Result<(), StoreError>;
}

/// A log file on disk, one per watched directory
#[derive(Debug, Clone)]
pub struct FileLogStore {
    path: PathBuf,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventionally named log file owned by `directory`
    pub fn for_directory(directory: &Path, file_name: &str) -> Self {
        Self::new(directory.join(file_name))
    }
}

impl LogStore for FileLogStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|e| StoreError::from_io(&self.path, e))
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        // Write to temporary file first
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, contents).map_err(|e| StoreError::from_io(&temp_path, e))?;

        // Atomic rename
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = ?temp_path, "Failed to remove temporary log file: {}", cleanup);
            }
            return Err(StoreError::from_io(&self.path, e));
        }

        debug!(path = ?self.path, bytes = contents.len(), "Rename log written");
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Rename log removed: {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::from_io(&self.path, e)),
        }
    }
}

/// An in-memory log store with switchable failures
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    location: PathBuf,
    contents: RefCell<Option<String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self {
            location: PathBuf::from("<memory>"),
            ..Self::default()
        }
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::new();
        store.contents.replace(Some(contents.into()));
        store
    }

    /// Current contents, or `None` if nothing was ever written
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn injected(&self, operation: &str) -> StoreError {
        StoreError::Io {
            path: self.location.clone(),
            source: io::Error::new(io::ErrorKind::Other, format!("injected {} failure", operation)),
        }
    }
}

impl LogStore for MemoryLogStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn read(&self) -> Result<String, StoreError> {
        if self.fail_reads.get() {
            return Err(self.injected("read"));
        }
        self.contents
            .borrow()
            .clone()
            .ok_or_else(|| StoreError::NotFound(self.location.clone()))
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(self.injected("write"));
        }
        self.contents.replace(Some(contents.to_string()));
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(self.injected("remove"));
        }
        self.contents.replace(None);
        Ok(())
    }
}
