mod rename_log;
mod storage;
mod types;

pub use rename_log::{LogState, RenameLog};
pub use storage::{FileLogStore, LogStore, MemoryLogStore, StoreError};
pub use types::*;
