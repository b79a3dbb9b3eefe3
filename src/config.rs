use std::collections::HashSet;
use std::env;

use tracing::debug;

/// Environment variable names for overriding defaults
pub const ENV_VIDEO_EXTENSIONS: &str = "SUBRENAME_VIDEO_EXTENSIONS";
pub const ENV_SUBTITLE_EXTENSIONS: &str = "SUBRENAME_SUBTITLE_EXTENSIONS";
pub const ENV_LOG_FILE: &str = "SUBRENAME_LOG_FILE";

pub const DEFAULT_LOG_FILE: &str = ".subrename-log.json";

const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ts",
];

const DEFAULT_SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "sub", "vtt", "idx", "sup"];

/// Which files count as videos and subtitles, and where the log lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub video_extensions: HashSet<String>,
    pub subtitle_extensions: HashSet<String>,
    /// File name of the per-directory rename log
    pub log_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            subtitle_extensions: DEFAULT_SUBTITLE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            log_file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Replace the video allow-list if `list` names at least one extension
    pub fn with_video_extensions(mut self, list: Option<&str>) -> Self {
        if let Some(exts) = list.and_then(parse_extension_list) {
            self.video_extensions = exts;
        }
        self
    }

    /// Replace the subtitle allow-list if `list` names at least one extension
    pub fn with_subtitle_extensions(mut self, list: Option<&str>) -> Self {
        if let Some(exts) = list.and_then(parse_extension_list) {
            self.subtitle_extensions = exts;
        }
        self
    }
}

/// Load configuration from environment variables
///
/// Optional environment variables:
/// - `SUBRENAME_VIDEO_EXTENSIONS`: comma separated, e.g. `mkv,mp4`
/// - `SUBRENAME_SUBTITLE_EXTENSIONS`: comma separated, e.g. `srt,ass`
/// - `SUBRENAME_LOG_FILE`: log file name inside the target directory
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> Config {
    let mut config = Config::default()
        .with_video_extensions(env::var(ENV_VIDEO_EXTENSIONS).ok().as_deref())
        .with_subtitle_extensions(env::var(ENV_SUBTITLE_EXTENSIONS).ok().as_deref());

    if let Ok(name) = env::var(ENV_LOG_FILE) {
        let name = name.trim();
        if !name.is_empty() {
            config.log_file_name = name.to_string();
        }
    }

    debug!(?config, "Configuration loaded");
    config
}

/// Parse `"mkv, .MP4,avi"` into `{"mkv", "mp4", "avi"}`; `None` if nothing usable
fn parse_extension_list(list: &str) -> Option<HashSet<String>> {
    let exts: HashSet<String> = list
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    if exts.is_empty() {
        None
    } else {
        Some(exts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env var tests (they share global state)
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.video_extensions.contains("mkv"));
        assert!(config.subtitle_extensions.contains("srt"));
        assert!(!config.subtitle_extensions.contains("mkv"));
        assert_eq!(config.log_file_name, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_parse_extension_list() {
        let exts = parse_extension_list(" .MKV, mp4 ,,avi").unwrap();
        assert_eq!(exts.len(), 3);
        assert!(exts.contains("mkv"));
        assert!(exts.contains("mp4"));
        assert!(exts.contains("avi"));

        assert!(parse_extension_list(" , ").is_none());
    }

    #[test]
    fn test_empty_override_keeps_defaults() {
        let config = Config::default().with_subtitle_extensions(Some(""));
        assert_eq!(config.subtitle_extensions, Config::default().subtitle_extensions);
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::remove_var(ENV_VIDEO_EXTENSIONS);
        env::remove_var(ENV_SUBTITLE_EXTENSIONS);
        env::remove_var(ENV_LOG_FILE);

        assert_eq!(config_from_env(), Config::default());
    }

    #[test]
    fn test_config_from_env_with_values() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_VIDEO_EXTENSIONS, "mkv");
        env::set_var(ENV_SUBTITLE_EXTENSIONS, "ass,ssa");
        env::set_var(ENV_LOG_FILE, "renames.json");

        let config = config_from_env();

        assert_eq!(config.video_extensions.len(), 1);
        assert!(config.subtitle_extensions.contains("ssa"));
        assert_eq!(config.log_file_name, "renames.json");

        // Cleanup
        env::remove_var(ENV_VIDEO_EXTENSIONS);
        env::remove_var(ENV_SUBTITLE_EXTENSIONS);
        env::remove_var(ENV_LOG_FILE);
    }
}
