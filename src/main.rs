use clap::Parser;
use std::path::Path;
use tracing::{debug, error, info, warn};

use subrename::cli::Args;
use subrename::output::{display_dry_run, display_execution_result, display_history};
use subrename::progress::Progress;
use subrename::{
    commit_batch, config_from_env, discover, logging, scan_directory, undo, AppError,
    FsRenameExecutor, LogStore, RenameLog,
};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = config_from_env()
        .with_video_extensions(args.video_ext.as_deref())
        .with_subtitle_extensions(args.subtitle_ext.as_deref());

    let mut progress = Progress::for_verbosity(args.verbose > 0);
    let target_dir = &args.target_dir;

    ensure_directory(target_dir)?;

    let mut log = RenameLog::for_directory(target_dir, &config.log_file_name);
    let log_path = log.store().location().to_path_buf();

    if args.clear_history {
        if args.dry {
            match log.load() {
                Ok(count) => println!(
                    "Dry run: {} entries would be cleared from {}",
                    count,
                    log_path.display()
                ),
                Err(e) => {
                    warn!("{}", e);
                    println!(
                        "Dry run: unreadable rename log would be discarded: {}",
                        log_path.display()
                    );
                }
            }
            return Ok(());
        }

        let removed = log
            .clear()
            .map_err(|e| AppError::from(e).with_log_path(log_path.clone()))?;
        info!("Cleared rename log ({} entries)", removed);
        println!("Rename log cleared: {}", log_path.display());
        return Ok(());
    }

    let count = log
        .load()
        .map_err(|e| AppError::from(e).with_log_path(log_path.clone()))?;
    progress.history_loaded(count);

    if args.history {
        display_history(log.items()?, &mut std::io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        return Ok(());
    }

    if let Some(requested) = args.undo {
        if args.dry {
            let items = log.items()?;
            let start = items.len().saturating_sub(requested);
            println!("Dry run: these renames would be undone, newest last:");
            display_history(&items[start..], &mut std::io::stdout())
                .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
            return Ok(());
        }

        undo(&mut log, &FsRenameExecutor, requested, &mut progress)
            .map_err(|e| AppError::from(e).with_log_path(log_path.clone()))?;
        return Ok(());
    }

    // Step 1: Scan directory
    progress.scan_start(target_dir);
    let entries = scan_directory(target_dir)?;
    debug!("Found {} entries", entries.len());

    // Step 2: Pair candidates the log has not already handled
    let pairing = discover(
        &entries,
        &config,
        &log,
        &args.video_search,
        &args.subtitle_search,
    )?;

    info!("Paired {} subtitles for renaming", pairing.len());

    // Step 3: Rename and record
    if args.dry {
        progress.rename_complete(pairing.len(), true);
        display_dry_run(&pairing, &mut std::io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        return Ok(());
    }

    let committed = commit_batch(&mut log, &FsRenameExecutor, &pairing.pairs, &mut progress)
        .map_err(|e| AppError::from(e).with_log_path(log_path.clone()))?;

    progress.rename_complete(committed.len(), false);
    display_execution_result(&committed, &pairing, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    Ok(())
}

fn ensure_directory(path: &Path) -> Result<(), AppError> {
    if !path.exists() {
        return Err(AppError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(AppError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
