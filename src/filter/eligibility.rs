use std::collections::HashSet;
use std::path::PathBuf;

use tracing::trace;

use crate::entry::FileEntry;

/// Lower-cased extension of a file name, or an empty string when there is no `.`
pub fn file_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// File name without its final extension
pub fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Check whether an entry can be offered as a rename candidate.
///
/// Directories never qualify. Extensionless names yield `""`, which no
/// allow-list contains in practice, so they drop out without a special case.
pub fn is_eligible(
    entry: &FileEntry,
    allowed_extensions: &HashSet<String>,
    excluded_paths: &HashSet<PathBuf>,
) -> bool {
    if entry.is_dir() {
        return false;
    }

    if !allowed_extensions.contains(&file_extension(&entry.name)) {
        return false;
    }

    !excluded_paths.contains(&entry.path)
}

/// Walk a listing (including any nested children) and keep every eligible leaf
pub fn collect_candidates(
    entries: &[FileEntry],
    allowed_extensions: &HashSet<String>,
    excluded_paths: &HashSet<PathBuf>,
) -> Vec<FileEntry> {
    let mut candidates = Vec::new();
    collect_into(entries, allowed_extensions, excluded_paths, &mut candidates);
    candidates
}

fn collect_into(
    entries: &[FileEntry],
    allowed_extensions: &HashSet<String>,
    excluded_paths: &HashSet<PathBuf>,
    out: &mut Vec<FileEntry>,
) {
    for entry in entries {
        if let Some(children) = &entry.children {
            collect_into(children, allowed_extensions, excluded_paths, out);
            continue;
        }

        if is_eligible(entry, allowed_extensions, excluded_paths) {
            out.push(entry.clone());
        } else {
            trace!(path = ?entry.path, "Skipping ineligible entry");
        }
    }
}
