use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "subrename")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename subtitle files to match their paired video files")]
pub struct Args {
    /// Directory containing the video and subtitle files
    pub target_dir: PathBuf,

    /// Simulate changes without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Undo the most recent renames recorded in the log (default: 1)
    #[arg(
        short,
        long,
        value_name = "COUNT",
        num_args = 0..=1,
        default_missing_value = "1",
        conflicts_with_all = ["history", "clear_history"]
    )]
    pub undo: Option<usize>,

    /// Show the renames recorded for the directory
    #[arg(long, conflicts_with = "clear_history")]
    pub history: bool,

    /// Delete the directory's rename log
    #[arg(long)]
    pub clear_history: bool,

    /// Only pair videos whose name contains every word of QUERY
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub video_search: String,

    /// Only pair subtitles whose name contains every word of QUERY
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub subtitle_search: String,

    /// Video extensions, comma separated (overrides SUBRENAME_VIDEO_EXTENSIONS)
    #[arg(long, value_name = "LIST")]
    pub video_ext: Option<String>,

    /// Subtitle extensions, comma separated (overrides SUBRENAME_SUBTITLE_EXTENSIONS)
    #[arg(long, value_name = "LIST")]
    pub subtitle_ext: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_defaults_to_one() {
        let args = Args::parse_from(["subrename", "/media", "--undo"]);
        assert_eq!(args.undo, Some(1));
        assert_eq!(args.target_dir, PathBuf::from("/media"));
    }

    #[test]
    fn test_undo_with_count() {
        let args = Args::parse_from(["subrename", "/media", "--undo", "3"]);
        assert_eq!(args.undo, Some(3));
    }

    #[test]
    fn test_undo_conflicts_with_history() {
        let result = Args::try_parse_from(["subrename", "/media", "--undo", "--history"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_defaults_empty() {
        let args = Args::parse_from(["subrename", "/media"]);
        assert!(args.video_search.is_empty());
        assert!(args.subtitle_search.is_empty());
        assert!(!args.dry);
    }
}
