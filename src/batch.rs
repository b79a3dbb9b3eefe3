use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::executor::RenameExecutor;
use crate::pairing::RenamePair;
use crate::progress::Progress;
use crate::renamelog::{LogError, LogItem, LogStore, RenameLog};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Log(#[from] LogError),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rename of '{path}' was moved back because it could not be logged: {source}")]
    NotCommitted {
        path: PathBuf,
        #[source]
        source: LogError,
    },

    #[error("Rename log and disk disagree about '{path}': {detail}")]
    Unreconciled { path: PathBuf, detail: String },
}

/// Rename one subtitle on disk and record it.
///
/// The file is moved first and logged second. If logging fails the move is
/// undone, so the log never claims a rename that is not on disk.
pub fn commit_pair<S: LogStore, E: RenameExecutor>(
    log: &mut RenameLog<S>,
    executor: &E,
    pair: &RenamePair,
) -> Result<LogItem, BatchError> {
    let item = pair.to_log_item()?;

    // Unknown history means we cannot tell whether this was renamed before
    log.items()?;

    executor
        .rename(&pair.subtitle.path, &pair.new_path)
        .map_err(|source| BatchError::RenameError {
            from: pair.subtitle.path.clone(),
            to: pair.new_path.clone(),
            source,
        })?;

    if let Err(log_error) = log.append(item.clone()) {
        warn!(
            path = ?pair.subtitle.path,
            "Could not log rename, moving file back: {}", log_error
        );

        return match executor.rename(&pair.new_path, &pair.subtitle.path) {
            Ok(()) => Err(BatchError::NotCommitted {
                path: pair.subtitle.path.clone(),
                source: log_error,
            }),
            Err(move_back) => {
                error!(path = ?pair.new_path, "Move back failed: {}", move_back);
                Err(BatchError::Unreconciled {
                    path: pair.new_path.clone(),
                    detail: format!(
                        "renamed from '{}' but not logged ({}), and moving it back failed ({})",
                        pair.subtitle.path.display(),
                        log_error,
                        move_back
                    ),
                })
            }
        };
    }

    Ok(item)
}

/// Commit pairs in order, stopping at the first failure.
///
/// Pairs committed before a failure stay committed and logged.
pub fn commit_batch<S: LogStore, E: RenameExecutor>(
    log: &mut RenameLog<S>,
    executor: &E,
    pairs: &[RenamePair],
    progress: &mut Progress,
) -> Result<Vec<LogItem>, BatchError> {
    let total = pairs.len();
    let mut committed = Vec::with_capacity(total);

    for (i, pair) in pairs.iter().enumerate() {
        progress.rename_progress(i + 1, total, &pair.subtitle.name, &pair.new_name);

        match commit_pair(log, executor, pair) {
            Ok(item) => committed.push(item),
            Err(e) => {
                if !committed.is_empty() {
                    progress.warn(&format!(
                        "{} of {} renames were committed before the failure",
                        committed.len(),
                        total
                    ));
                }
                return Err(e);
            }
        }
    }

    info!("Committed {} renames", committed.len());
    Ok(committed)
}

/// Reverse the most recent committed rename.
///
/// The log entry is dropped first and the file moved back second; if the move
/// fails the entry is restored.
pub fn undo_last<S: LogStore, E: RenameExecutor>(
    log: &mut RenameLog<S>,
    executor: &E,
) -> Result<Option<LogItem>, BatchError> {
    let Some(item) = log.remove_last()? else {
        debug!("Nothing to undo");
        return Ok(None);
    };

    if let Err(source) = executor.rename(item.renamed_path(), item.original_path()) {
        let from = item.renamed_path().to_path_buf();
        let to = item.original_path().to_path_buf();

        if let Err(log_error) = log.append(item) {
            error!(path = ?from, "Could not restore log entry: {}", log_error);
            return Err(BatchError::Unreconciled {
                path: from,
                detail: format!(
                    "undo failed ({}) and the log entry could not be restored ({})",
                    source, log_error
                ),
            });
        }

        return Err(BatchError::RenameError { from, to, source });
    }

    info!(
        "Undid rename: {:?} -> {:?}",
        item.renamed_path(),
        item.original_path()
    );
    Ok(Some(item))
}

/// Undo up to `count` renames, newest first
pub fn undo<S: LogStore, E: RenameExecutor>(
    log: &mut RenameLog<S>,
    executor: &E,
    count: usize,
    progress: &mut Progress,
) -> Result<Vec<LogItem>, BatchError> {
    let total = count.min(log.items()?.len());
    progress.undo_start(total);

    let mut undone = Vec::with_capacity(total);

    for i in 0..total {
        match undo_last(log, executor)? {
            Some(item) => {
                let from = display_name(&item.change().entry.name);
                let to = display_name(&item.entry_for(item.change().role).name);
                progress.undo_progress(i + 1, total, from, to);
                undone.push(item);
            }
            None => break,
        }
    }

    progress.undo_complete(undone.len());
    Ok(undone)
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "<unnamed>"
    } else {
        name
    }
}
