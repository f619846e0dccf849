//! Depth-first directory traversal.
//!
//! # Overview
//!
//! The [`Traverser`] lists a directory, classifies every entry and applies
//! it to a [`DuplicateIndex`]: subdirectories are recursed into, regular
//! files are fingerprinted and indexed, everything else is ignored.
//!
//! By default traversal is fail-fast. The first listing or read failure
//! aborts the whole scan and is returned to the caller; index entries added
//! before the failure stay in the index. Entries are processed in the order
//! the filesystem returns them unless [`TraverseConfig::sort_entries`] is
//! set.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateIndex;
//! use dupescan::scanner::{TraverseConfig, Traverser};
//! use std::path::Path;
//!
//! let config = TraverseConfig::default().with_sorted_entries(true);
//! let mut traverser = Traverser::new(config);
//! let mut index = DuplicateIndex::new();
//!
//! traverser
//!     .traverse_dir_recursively(&mut index, Path::new("/home/user/Downloads"))
//!     .unwrap();
//! println!("{} files scanned", traverser.stats().files);
//! ```

use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Instant;

use super::entry::Entry;
use super::{ScanError, ScanStats, TraverseConfig};
use crate::duplicates::DuplicateIndex;

/// Recursive directory traverser feeding a [`DuplicateIndex`].
#[derive(Debug, Default)]
pub struct Traverser {
    /// Traversal configuration
    config: TraverseConfig,
    /// Counters for the current scan
    stats: ScanStats,
    /// Current recursion depth, 0 while listing the root
    depth: usize,
}

impl Traverser {
    /// Create a traverser with the given configuration.
    #[must_use]
    pub fn new(config: TraverseConfig) -> Self {
        Self {
            config,
            stats: ScanStats::default(),
            depth: 0,
        }
    }

    /// Counters collected so far.
    #[must_use]
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.stats
    }

    /// Walk `directory` and everything below it, adding every regular file
    /// to `index`.
    ///
    /// # Errors
    ///
    /// - A listing failure ([`ScanError::NotFound`],
    ///   [`ScanError::PermissionDenied`], [`ScanError::NotADirectory`],
    ///   [`ScanError::Io`]) for `directory` or any subdirectory
    /// - [`ScanError::Hash`] if a file cannot be read
    /// - [`ScanError::DeadlineExceeded`] or [`ScanError::Interrupted`]
    ///
    /// With `skip_errors` set, only a failure to list `directory` itself,
    /// the deadline and interruption are returned.
    pub fn traverse_dir_recursively(
        &mut self,
        index: &mut DuplicateIndex,
        directory: &Path,
    ) -> Result<(), ScanError> {
        log::debug!("Scanning {}", directory.display());
        self.depth = 0;

        let started = Instant::now();
        let result = self.traverse(index, directory);

        log::debug!(
            "Scan of {} finished in {:?}: {} directories, {} files, {} other entries, {} skipped on error",
            directory.display(),
            started.elapsed(),
            self.stats.directories,
            self.stats.files,
            self.stats.skipped_other,
            self.stats.skipped_errors
        );
        result
    }

    /// List and process one directory. Called recursively through
    /// [`Entry::apply`].
    pub(crate) fn traverse(
        &mut self,
        index: &mut DuplicateIndex,
        directory: &Path,
    ) -> Result<(), ScanError> {
        self.check_deadline(directory)?;
        self.check_shutdown()?;

        let entries = match self.list_dir(directory) {
            Ok(entries) => entries,
            Err(e) if self.config.skip_errors && self.depth > 0 => {
                log::warn!("Skipping directory: {}", e);
                self.stats.skipped_errors += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.stats.directories += 1;

        self.depth += 1;
        let result = self.apply_entries(index, directory, entries);
        self.depth -= 1;
        result
    }

    fn apply_entries(
        &mut self,
        index: &mut DuplicateIndex,
        directory: &Path,
        entries: Vec<fs::DirEntry>,
    ) -> Result<(), ScanError> {
        for dir_entry in entries {
            let result = Entry::classify(directory, &dir_entry)
                .map_err(ScanError::from)
                .and_then(|entry| entry.apply(self, index));

            match result {
                Ok(()) => {}
                Err(e @ ScanError::Hash(_)) if self.config.skip_errors => {
                    log::warn!("Skipping file: {}", e);
                    self.stats.skipped_errors += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Read all entries of `directory`, optionally sorted by name.
    fn list_dir(&self, directory: &Path) -> Result<Vec<fs::DirEntry>, ScanError> {
        let mut entries = fs::read_dir(directory)
            .and_then(|read_dir| read_dir.collect::<Result<Vec<_>, _>>())
            .map_err(|e| ScanError::from_listing(directory, e))?;

        if self.config.sort_entries {
            entries.sort_by_key(fs::DirEntry::file_name);
        }
        log::trace!("Listed {} entries in {}", entries.len(), directory.display());
        Ok(entries)
    }

    fn check_deadline(&self, directory: &Path) -> Result<(), ScanError> {
        match self.config.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(ScanError::DeadlineExceeded(directory.to_path_buf()))
            }
            _ => Ok(()),
        }
    }

    /// Fail with [`ScanError::Interrupted`] once shutdown has been requested.
    pub(crate) fn check_shutdown(&self) -> Result<(), ScanError> {
        if self
            .config
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
        {
            log::debug!("Traverser: Shutdown requested, stopping");
            return Err(ScanError::Interrupted);
        }
        Ok(())
    }
}

/// Walk `directory` with the default fail-fast configuration.
///
/// # Errors
///
/// See [`Traverser::traverse_dir_recursively`].
pub fn traverse_dir_recursively(
    index: &mut DuplicateIndex,
    directory: &Path,
) -> Result<(), ScanError> {
    Traverser::default().traverse_dir_recursively(index, directory)
}
