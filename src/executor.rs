use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

/// Moves a file on disk. The rename log only records what this reports as done.
pub trait RenameExecutor {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Plain filesystem move that never overwrites an existing file
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRenameExecutor;

impl RenameExecutor for FsRenameExecutor {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if to.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Destination already exists",
            ));
        }

        fs::rename(from, to)?;
        info!("Renamed: {:?} -> {:?}", from, to);
        Ok(())
    }
}
