//! DupeScan - Recursive Duplicate File Reporter
//!
//! Walks a directory tree depth-first, fingerprints every regular file with
//! BLAKE3 and reports files whose content duplicates an earlier file, with
//! the number of distinct files and the bytes taken by duplicate copies.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;
pub mod size;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::DuplicateIndex;
use crate::error::ExitCode;
use crate::scanner::{ScanError, ScanStats, TraverseConfig, Traverser};

/// Scan `root` into a fresh index.
///
/// # Errors
///
/// Returns the first [`ScanError`] that aborts the traversal.
pub fn scan(root: &Path, config: TraverseConfig) -> Result<(DuplicateIndex, ScanStats), ScanError> {
    let mut traverser = Traverser::new(config);
    let mut index = DuplicateIndex::new();
    traverser.traverse_dir_recursively(&mut index, root)?;
    Ok((index, traverser.stats()))
}

/// Run the application for parsed command-line arguments and print the
/// report to stdout.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the scan aborts, or the
/// report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(&cli)?;
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::Success);
    }

    let root = match cli.scan_path() {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let shutdown = signal::install_handler()?;
    let (index, stats) = scan(&root, config.traverse_config(&shutdown))?;
    log::info!(
        "Scanned {} files under {}: {} duplicates",
        stats.files,
        root.display(),
        index.duplicate_count()
    );

    let mut stdout = io::stdout().lock();
    output::write_report(&mut stdout, config.output, &root, &index, stats)
        .context("Failed to write report")?;

    Ok(ExitCode::Success)
}
