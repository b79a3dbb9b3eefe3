//! Progress output for user-facing status updates.
//!
//! In verbose mode, output is suppressed since tracing handles everything.
//! In normal mode, output is shown with colors to give feedback while files
//! are renamed or restored.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter that stays quiet when `verbose` is set
    pub fn for_verbosity(verbose: bool) -> Self {
        Self {
            silent: verbose,
            ..Self::new()
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report the directory being scanned
    pub fn scan_start(&mut self, dir: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Scanning {}", dir.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Scanning {}", dir.display());
        }
    }

    /// Report how many entries the rename log already holds
    pub fn history_loaded(&mut self, count: usize) {
        if self.silent || count == 0 {
            return;
        }
        let msg = format!("{} earlier renames found in log", count);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        self.step(current, total, from, to);
    }

    /// Report a finished batch
    pub fn rename_complete(&mut self, count: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            let msg = format!("Dry run complete. {} subtitles would be renamed.", count);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", msg.dimmed());
            } else {
                let _ = writeln!(self.writer, "{}", msg);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} subtitles renamed", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Rename complete. {} subtitles renamed.", count);
        }
    }

    /// Report starting an undo
    pub fn undo_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        let msg = format!("Undoing {} renames from log", total);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.bold());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Report progress on a single undo
    pub fn undo_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        self.step(current, total, from, to);
    }

    /// Report undo complete
    pub fn undo_complete(&mut self, count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} subtitles restored", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Undo complete. {} subtitles restored.", count);
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    fn step(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_progress() -> (Progress, std::sync::Arc<std::sync::Mutex<Vec<u8>>>) {
        let buffer = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let writer = TestWriter(buffer.clone());
        let progress = Progress::with_writer(Box::new(writer));
        (progress, buffer)
    }

    struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn output(buffer: &std::sync::Arc<std::sync::Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_rename_progress() {
        let (mut progress, buffer) = create_test_progress();

        progress.rename_progress(1, 2, "ep1.srt", "Show 01.srt");
        progress.rename_progress(2, 2, "ep2.srt", "Show 02.srt");

        let output = output(&buffer);
        assert!(output.contains("[1/2] ep1.srt -> Show 01.srt"));
        assert!(output.contains("[2/2]"));
    }

    #[test]
    fn test_rename_complete_dry_run() {
        let (mut progress, buffer) = create_test_progress();

        progress.rename_complete(3, true);

        assert!(output(&buffer).contains("3 subtitles would be renamed"));
    }

    #[test]
    fn test_empty_history_is_quiet() {
        let (mut progress, buffer) = create_test_progress();

        progress.history_loaded(0);

        assert!(output(&buffer).is_empty());
    }

    #[test]
    fn test_undo_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.undo_start(1);
        progress.undo_progress(1, 1, "Show 01.srt", "ep1.srt");
        progress.undo_complete(1);

        let output = output(&buffer);
        assert!(output.contains("Undoing 1 renames"));
        assert!(output.contains("Show 01.srt -> ep1.srt"));
        assert!(output.contains("1 subtitles restored"));
    }

    #[test]
    fn test_silent_writes_nothing() {
        let (mut progress, buffer) = create_test_progress();
        progress.silent = true;

        progress.scan_start(Path::new("/media"));
        progress.history_loaded(3);
        progress.rename_progress(1, 1, "ep1.srt", "Show 01.srt");
        progress.rename_complete(1, false);
        progress.undo_start(1);
        progress.undo_progress(1, 1, "Show 01.srt", "ep1.srt");
        progress.undo_complete(1);
        progress.warn("ignored");

        assert!(output(&buffer).is_empty());
    }

    #[test]
    fn test_for_verbosity_silences_verbose_mode() {
        assert!(Progress::for_verbosity(true).silent);
        assert!(!Progress::for_verbosity(false).silent);
        assert!(Progress::silent().silent);
    }
}
