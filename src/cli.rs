//! Command-line interface definitions for DupeScan.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory
//! dupescan
//!
//! # Scan a directory in deterministic order, JSON output
//! dupescan ~/Downloads --sort --output json
//!
//! # Keep going past unreadable files, give up after a minute
//! dupescan /srv/data --skip-errors --timeout 60
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recursive content-hash duplicate file reporter.
///
/// Walks a directory tree, fingerprints every regular file with BLAKE3 and
/// reports files whose content duplicates another file.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to the current working directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Directory to scan, as a flag
    #[arg(long = "path", value_name = "PATH", conflicts_with = "path")]
    pub path_flag: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Process directory entries in name order
    #[arg(long)]
    pub sort: bool,

    /// Log and skip unreadable files and directories instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Abort the scan after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Configuration file (TOML) to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Directory given on the command line, positional or `--path`.
    #[must_use]
    pub fn scan_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| self.path_flag.clone())
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
