use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::entry::{FileEntry, FileRole};
use crate::filter::{collect_candidates, file_stem, matches_search};
use crate::ordering::sort_entries;
use crate::renamelog::{ChangedFileEntry, LogError, LogItem, LogStore, RenameLog};

/// A video and the subtitle that should be renamed after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub video: FileEntry,
    pub subtitle: FileEntry,
    /// Proposed subtitle name: video stem plus the subtitle's own extension
    pub new_name: String,
    /// Proposed subtitle path, in the subtitle's directory
    pub new_path: PathBuf,
}

impl RenamePair {
    pub fn new(video: FileEntry, subtitle: FileEntry) -> Self {
        let extension = subtitle
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        let new_name = format!("{}.{}", file_stem(&video.name), extension);

        let new_path = subtitle
            .path
            .parent()
            .map(|p| p.join(&new_name))
            .unwrap_or_else(|| PathBuf::from(&new_name));

        Self {
            video,
            subtitle,
            new_name,
            new_path,
        }
    }

    /// The subtitle already carries its proposed name
    pub fn is_already_matched(&self) -> bool {
        self.new_path == self.subtitle.path
    }

    /// Log record for renaming this pair's subtitle
    pub fn to_log_item(&self) -> Result<LogItem, LogError> {
        LogItem::new(
            self.video.clone(),
            self.subtitle.clone(),
            ChangedFileEntry::new(self.new_path.clone(), FileRole::Subtitle),
        )
    }
}

/// Outcome of pairing video and subtitle candidates positionally
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// Pairs whose subtitle needs renaming
    pub pairs: Vec<RenamePair>,
    /// Pairs whose subtitle is already named after its video
    pub matched: Vec<RenamePair>,
    /// Pairs held back because another pair claims the same new path
    pub conflicts: Vec<RenamePair>,
    pub unpaired_videos: Vec<FileEntry>,
    pub unpaired_subtitles: Vec<FileEntry>,
}

impl Pairing {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// Sort both candidate lists and pair `videos[i]` with `subtitles[i]`.
///
/// Whatever is left over on the longer side is reported as unpaired.
pub fn pair_candidates(mut videos: Vec<FileEntry>, mut subtitles: Vec<FileEntry>) -> Pairing {
    sort_entries(&mut videos);
    sort_entries(&mut subtitles);

    let paired = videos.len().min(subtitles.len());
    let unpaired_videos = videos.split_off(paired);
    let unpaired_subtitles = subtitles.split_off(paired);

    let mut pairing = Pairing {
        unpaired_videos,
        unpaired_subtitles,
        ..Pairing::default()
    };

    let mut proposed = Vec::with_capacity(paired);
    for (video, subtitle) in videos.into_iter().zip(subtitles) {
        let pair = RenamePair::new(video, subtitle);
        if pair.is_already_matched() {
            debug!(name = %pair.subtitle.name, "Subtitle already matches its video");
            pairing.matched.push(pair);
        } else {
            proposed.push(pair);
        }
    }

    // A matched subtitle already occupies its path, so it counts as a claim too
    let mut claims: HashMap<PathBuf, usize> = HashMap::new();
    for path in pairing
        .matched
        .iter()
        .chain(&proposed)
        .map(|pair| pair.new_path.clone())
    {
        *claims.entry(path).or_default() += 1;
    }

    for pair in proposed {
        if claims.get(&pair.new_path).copied().unwrap_or_default() > 1 {
            warn!(
                subtitle = %pair.subtitle.name,
                target = %pair.new_name,
                "Several subtitles would get the same name, skipping"
            );
            pairing.conflicts.push(pair);
        } else {
            pairing.pairs.push(pair);
        }
    }

    if !pairing.unpaired_videos.is_empty() || !pairing.unpaired_subtitles.is_empty() {
        warn!(
            videos = pairing.unpaired_videos.len(),
            subtitles = pairing.unpaired_subtitles.len(),
            "Candidate counts differ, leftovers stay unpaired"
        );
    }

    pairing
}

/// Turn a fresh listing into rename pairs.
///
/// Files the log has already touched are hidden from both candidate lists, so
/// a re-run never offers a committed rename again. Refuses to guess when the
/// log could not be loaded.
pub fn discover<S: LogStore>(
    entries: &[FileEntry],
    config: &Config,
    log: &RenameLog<S>,
    video_query: &str,
    subtitle_query: &str,
) -> Result<Pairing, LogError> {
    let excluded: HashSet<PathBuf> = log
        .extract_paths(FileRole::Video)?
        .into_iter()
        .chain(log.extract_paths(FileRole::Subtitle)?)
        .collect();

    debug!(count = excluded.len(), "Paths hidden by rename log");

    let videos: Vec<FileEntry> = collect_candidates(entries, &config.video_extensions, &excluded)
        .into_iter()
        .filter(|e| matches_search(&e.name, video_query))
        .collect();

    let subtitles: Vec<FileEntry> =
        collect_candidates(entries, &config.subtitle_extensions, &excluded)
            .into_iter()
            .filter(|e| matches_search(&e.name, subtitle_query))
            .collect();

    info!(
        videos = videos.len(),
        subtitles = subtitles.len(),
        "Candidates found"
    );

    Ok(pair_candidates(videos, subtitles))
}
