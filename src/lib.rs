pub mod batch;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod executor;
pub mod filter;
pub mod logging;
pub mod ordering;
pub mod output;
pub mod pairing;
pub mod progress;
pub mod renamelog;
pub mod scanner;

pub use batch::{commit_batch, commit_pair, undo, undo_last, BatchError};
pub use config::{config_from_env, Config};
pub use entry::{FileEntry, FileRole};
pub use error::{AppError, ExitCode};
pub use executor::{FsRenameExecutor, RenameExecutor};
pub use filter::{collect_candidates, is_eligible, matches_search};
pub use ordering::{compare_paths, sort_entries};
pub use pairing::{discover, pair_candidates, Pairing, RenamePair};
pub use renamelog::{
    ChangedFileEntry, FileLogStore, LogError, LogItem, LogState, LogStore, MemoryLogStore,
    RenameLog, StoreError,
};
pub use scanner::{scan_directory, ScannerError};
