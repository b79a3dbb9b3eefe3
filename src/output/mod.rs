use crate::pairing::Pairing;
use crate::renamelog::LogItem;
use std::io::{self, Write};

/// Display dry run results in a formatted output
pub fn display_dry_run(pairing: &Pairing, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Pairs:      {}", pairing.pairs.len())?;
    writeln!(writer)?;

    if pairing.pairs.is_empty() {
        writeln!(writer, "No subtitles to rename.")?;
    } else {
        writeln!(writer, "Planned changes:")?;
        writeln!(writer)?;

        for (i, pair) in pairing.pairs.iter().enumerate() {
            writeln!(writer, "  {}. {}", i + 1, pair.video.name)?;
            writeln!(writer, "     From: {}", pair.subtitle.name)?;
            writeln!(writer, "     To:   {}", pair.new_name)?;
            writeln!(writer)?;
        }
    }

    display_leftovers(pairing, writer)?;

    if !pairing.pairs.is_empty() {
        writeln!(writer, "Run without --dry to apply these changes.")?;
    }

    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(
    committed: &[LogItem],
    pairing: &Pairing,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Successfully renamed {} subtitles.", committed.len())?;
    display_leftovers(pairing, writer)
}

/// Display every committed rename in the log, oldest first
pub fn display_history(items: &[LogItem], writer: &mut impl Write) -> io::Result<()> {
    if items.is_empty() {
        writeln!(writer, "No renames recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Recorded renames ({}):", items.len())?;
    writeln!(writer)?;

    for (i, item) in items.iter().enumerate() {
        writeln!(
            writer,
            "  {}. [{}] {}",
            i + 1,
            item.change().role,
            item.video().name
        )?;
        writeln!(writer, "     From: {}", item.original_path().display())?;
        writeln!(writer, "     To:   {}", item.renamed_path().display())?;
    }

    Ok(())
}

fn display_leftovers(pairing: &Pairing, writer: &mut impl Write) -> io::Result<()> {
    if pairing.matched.is_empty()
        && pairing.conflicts.is_empty()
        && pairing.unpaired_videos.is_empty()
        && pairing.unpaired_subtitles.is_empty()
    {
        return Ok(());
    }

    writeln!(writer, "----------------------------------------")?;

    if !pairing.matched.is_empty() {
        writeln!(
            writer,
            "  {} subtitles already match their video",
            pairing.matched.len()
        )?;
    }

    if !pairing.conflicts.is_empty() {
        writeln!(writer, "  Skipped, target name claimed more than once:")?;
        for pair in &pairing.conflicts {
            writeln!(writer, "    - {} -> {}", pair.subtitle.name, pair.new_name)?;
        }
    }

    if !pairing.unpaired_videos.is_empty() {
        writeln!(writer, "  Videos without a subtitle:")?;
        for entry in &pairing.unpaired_videos {
            writeln!(writer, "    - {}", entry.name)?;
        }
    }

    if !pairing.unpaired_subtitles.is_empty() {
        writeln!(writer, "  Subtitles without a video:")?;
        for entry in &pairing.unpaired_subtitles {
            writeln!(writer, "    - {}", entry.name)?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileEntry;
    use crate::pairing::pair_candidates;

    fn files(paths: &[&str]) -> Vec<FileEntry> {
        paths.iter().map(|p| FileEntry::file(*p)).collect()
    }

    fn create_test_pairing() -> Pairing {
        pair_candidates(
            files(&["/m/Show 01.mkv", "/m/Show 02.mkv", "/m/Show 03.mkv"]),
            files(&["/m/ep1.srt", "/m/ep2.srt"]),
        )
    }

    #[test]
    fn test_display_dry_run() {
        let pairing = create_test_pairing();
        let mut output = Vec::new();

        display_dry_run(&pairing, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("DRY RUN"));
        assert!(output_str.contains("From: ep1.srt"));
        assert!(output_str.contains("To:   Show 01.srt"));
        assert!(output_str.contains("Videos without a subtitle"));
        assert!(output_str.contains("Show 03.mkv"));
        assert!(output_str.contains("Run without --dry"));
    }

    #[test]
    fn test_display_dry_run_lists_conflicts() {
        let pairing = pair_candidates(
            files(&["/m/A.mkv", "/m/A.mp4"]),
            files(&["/m/1.srt", "/m/2.srt"]),
        );
        let mut output = Vec::new();

        display_dry_run(&pairing, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("No subtitles to rename"));
        assert!(output_str.contains("claimed more than once"));
        assert!(output_str.contains("1.srt -> A.srt"));
        assert!(output_str.contains("2.srt -> A.srt"));
    }

    #[test]
    fn test_display_dry_run_empty() {
        let pairing = Pairing::default();
        let mut output = Vec::new();

        display_dry_run(&pairing, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("DRY RUN"));
        assert!(output_str.contains("No subtitles to rename"));
        assert!(!output_str.contains("Run without --dry"));
    }

    #[test]
    fn test_display_execution_result() {
        let pairing = create_test_pairing();
        let committed: Vec<LogItem> = pairing
            .pairs
            .iter()
            .map(|p| p.to_log_item().unwrap())
            .collect();
        let mut output = Vec::new();

        display_execution_result(&committed, &pairing, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Successfully renamed 2 subtitles"));
    }

    #[test]
    fn test_display_history() {
        let pairing = create_test_pairing();
        let items: Vec<LogItem> = pairing
            .pairs
            .iter()
            .map(|p| p.to_log_item().unwrap())
            .collect();
        let mut output = Vec::new();

        display_history(&items, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Recorded renames (2)"));
        assert!(output_str.contains("[subtitle] Show 01.mkv"));
        assert!(output_str.contains("From: /m/ep1.srt"));
        assert!(output_str.contains("To:   /m/Show 01.srt"));
    }

    #[test]
    fn test_display_empty_history() {
        let mut output = Vec::new();
        display_history(&[], &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("No renames recorded"));
    }
}
