//! JSON output formatter for scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/home/user/Downloads",
//!   "duplicates": [
//!     { "original": "/home/user/Downloads/a.txt", "duplicate": "/home/user/Downloads/b.txt" }
//!   ],
//!   "total_files": 2,
//!   "duplicate_count": 1,
//!   "total_duplicate_size": 41,
//!   "total_duplicate_size_readable": "41 B",
//!   "stats": { "directories": 1, "files": 3, "skipped_other": 0, "skipped_errors": 0 }
//! }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::duplicates::ScanSummary;
use crate::scanner::ScanStats;

/// Traversal counters in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonStats {
    /// Directories listed
    pub directories: usize,
    /// Regular files fingerprinted
    pub files: usize,
    /// Non-regular entries ignored
    pub skipped_other: usize,
    /// Entries skipped after an error
    pub skipped_errors: usize,
}

impl From<ScanStats> for JsonStats {
    fn from(stats: ScanStats) -> Self {
        Self {
            directories: stats.directories,
            files: stats.files,
            skipped_other: stats.skipped_other,
            skipped_errors: stats.skipped_errors,
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned directory
    pub root: PathBuf,
    /// Index contents and totals
    #[serde(flatten)]
    pub summary: ScanSummary,
    /// Traversal counters
    pub stats: JsonStats,
}

impl JsonOutput {
    /// Build the document for one scan.
    #[must_use]
    pub fn new(root: &Path, summary: ScanSummary, stats: ScanStats) -> Self {
        Self {
            root: root.to_path_buf(),
            summary,
            stats: stats.into(),
        }
    }

    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Write pretty JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
