//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Depth-first directory traversal
//! - Entry classification (directory, regular file, other)
//! - Content fingerprinting with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`entry`]: Classification of directory entries into [`Entry`] variants
//! - [`walker`]: The recursive [`Traverser`]
//! - [`hasher`]: Whole-file BLAKE3 fingerprints
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateIndex;
//! use dupescan::scanner::traverse_dir_recursively;
//! use std::path::Path;
//!
//! let mut index = DuplicateIndex::new();
//! traverse_dir_recursively(&mut index, Path::new(".")).unwrap();
//! print!("{}", index.result());
//! ```

pub mod entry;
pub mod hasher;
pub mod walker;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

// Re-export main types
pub use entry::Entry;
pub use hasher::{fingerprint_bytes, fingerprint_file, Fingerprint, FINGERPRINT_LEN};
pub use walker::{traverse_dir_recursively, Traverser};

/// Configuration for directory traversal.
///
/// The default is strict fail-fast traversal in filesystem listing order.
#[derive(Debug, Clone, Default)]
pub struct TraverseConfig {
    /// Sort each directory listing by file name for deterministic output.
    pub sort_entries: bool,

    /// Log and skip entries that fail to list or read instead of aborting.
    /// A failure to list the root directory is always fatal.
    pub skip_errors: bool,

    /// Abort with [`ScanError::DeadlineExceeded`] once this instant passes.
    /// Checked before every directory listing.
    pub deadline: Option<Instant>,

    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl TraverseConfig {
    /// Sort directory listings by name.
    #[must_use]
    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Skip unreadable entries instead of failing.
    #[must_use]
    pub fn with_skip_errors(mut self, skip: bool) -> Self {
        self.skip_errors = skip;
        self
    }

    /// Set a deadline for the whole traversal.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }
}

/// Counters gathered while traversing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories listed, including the root
    pub directories: usize,
    /// Regular files fingerprinted
    pub files: usize,
    /// Entries that were neither directories nor regular files
    pub skipped_other: usize,
    /// Entries skipped because of errors (only with `skip_errors`)
    pub skipped_errors: usize,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when listing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read or fingerprinted.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The traversal deadline passed before the scan finished.
    #[error("Scan deadline exceeded before listing {0}")]
    DeadlineExceeded(PathBuf),

    /// Shutdown was requested while scanning.
    #[error("Scan interrupted")]
    Interrupted,
}

impl ScanError {
    /// Map a directory-listing failure to the matching variant.
    pub(crate) fn from_listing(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Whether this error came from listing a directory.
    #[must_use]
    pub fn is_listing_failure(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::NotADirectory(_)
                | Self::Io { .. }
        )
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Map a file read failure to the matching variant.
    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
