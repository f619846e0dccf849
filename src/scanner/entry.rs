//! Classification of directory entries.
//!
//! Each item returned by a directory listing becomes one [`Entry`] variant
//! carrying exactly the data needed to process it. Symbolic links are never
//! followed: the file type is taken from the entry itself, so a link to a
//! directory or file classifies as [`Entry::Skip`].

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use super::hasher::fingerprint_file;
use super::walker::Traverser;
use super::{HashError, ScanError};
use crate::duplicates::DuplicateIndex;

/// A classified filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A directory to recurse into
    Directory(PathBuf),
    /// A regular file to fingerprint
    File {
        /// Full path (parent joined with entry name)
        path: PathBuf,
        /// Size in bytes as reported by the listing
        size: i64,
    },
    /// Symlink, device, socket, FIFO or anything else
    Skip,
}

impl Entry {
    /// Classify a listing entry of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the entry's metadata cannot be read, which
    /// happens when a file vanishes between listing and inspection.
    pub fn classify(parent: &Path, dir_entry: &fs::DirEntry) -> Result<Self, HashError> {
        let path = parent.join(dir_entry.file_name());
        let metadata = dir_entry
            .metadata()
            .map_err(|e| HashError::from_io(&path, e))?;
        Ok(Self::from_metadata(path, &metadata))
    }

    /// Classify a path from already-fetched, non-following metadata.
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            Self::Directory(path)
        } else if file_type.is_file() {
            Self::File {
                path,
                size: i64::try_from(metadata.len()).unwrap_or(i64::MAX),
            }
        } else {
            log::trace!("Skipping non-regular entry: {}", path.display());
            Self::Skip
        }
    }

    /// Process this entry against the index.
    ///
    /// Directories recurse through the traverser, files are fingerprinted
    /// and added to the index, everything else is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates any listing or read failure from this entry or, for a
    /// directory, from anywhere in its subtree.
    pub fn apply(
        self,
        traverser: &mut Traverser,
        index: &mut DuplicateIndex,
    ) -> Result<(), ScanError> {
        match self {
            Self::Directory(path) => traverser.traverse(index, &path),
            Self::File { path, size } => {
                traverser.check_shutdown()?;
                let fingerprint = fingerprint_file(&path)?;
                index.add_entry(fingerprint, path, size);
                traverser.stats_mut().files += 1;
                Ok(())
            }
            Self::Skip => {
                traverser.stats_mut().skipped_other += 1;
                Ok(())
            }
        }
    }
}
