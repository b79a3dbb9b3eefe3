use std::cmp::Ordering;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::entry::FileEntry;

/// Natural comparison of two paths (`file2` before `file10`) that ignores
/// case and accents, so `Émile` sorts with `emile`
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    natord::compare_ignore_case(&fold_accents(a), &fold_accents(b))
}

fn fold_accents(path: &Path) -> String {
    path.to_string_lossy()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Sort entries by path. Stable, so entries that compare equal keep their order.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| compare_paths(&a.path, &b.path));
}
