//! Fingerprint index and duplicate records.
//!
//! # Overview
//!
//! [`DuplicateIndex`] maps every fingerprint to the first path seen with
//! it. When a later file reproduces a known fingerprint, the index records
//! it as the duplicate of that original path and adds its size to the
//! running duplicate total.
//!
//! Only one duplicate is kept per original path: when three or more files
//! share a fingerprint, each new duplicate replaces the previous one in the
//! record. The file count and duplicate size still account for every copy.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::DuplicateIndex;
//! use dupescan::scanner::fingerprint_bytes;
//! use std::path::PathBuf;
//!
//! let mut index = DuplicateIndex::new();
//! index.add_entry(fingerprint_bytes(b"same"), PathBuf::from("a.txt"), 4);
//! index.add_entry(fingerprint_bytes(b"same"), PathBuf::from("b.txt"), 4);
//!
//! assert_eq!(index.total_files(), 1);
//! assert_eq!(index.duplicate_count(), 1);
//! assert_eq!(index.dupe_size(), 4);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::Fingerprint;
use crate::size::to_readable_size;

/// Accumulates fingerprint to path mappings during a scan.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    /// Fingerprint -> first path seen with it
    hashes: HashMap<Fingerprint, PathBuf>,
    /// Original path -> most recently seen duplicate path
    duplicates: HashMap<PathBuf, PathBuf>,
    /// Bytes occupied by every copy after the first
    dupe_size: i64,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fingerprinted file.
    ///
    /// A new fingerprint is stored with `path` as its original. A known
    /// fingerprint makes `path` the duplicate of the original, replacing any
    /// earlier duplicate, and adds `size` to the duplicate total.
    pub fn add_entry(&mut self, fingerprint: Fingerprint, path: PathBuf, size: i64) {
        if let Some(original) = self.hashes.get(&fingerprint) {
            log::debug!("Duplicate: {} == {}", path.display(), original.display());
            if let Some(previous) = self.duplicates.insert(original.clone(), path) {
                log::trace!("Replaced earlier duplicate {}", previous.display());
            }
            self.dupe_size = self.dupe_size.saturating_add(size);
            return;
        }
        self.hashes.insert(fingerprint, path);
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.hashes.len()
    }

    /// Number of originals that have a recorded duplicate.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Total bytes occupied by duplicate copies.
    #[must_use]
    pub fn dupe_size(&self) -> i64 {
        self.dupe_size
    }

    /// First path seen with `fingerprint`.
    #[must_use]
    pub fn original_of(&self, fingerprint: &Fingerprint) -> Option<&Path> {
        self.hashes.get(fingerprint).map(PathBuf::as_path)
    }

    /// Latest duplicate recorded for `original`.
    #[must_use]
    pub fn duplicate_of(&self, original: &Path) -> Option<&Path> {
        self.duplicates.get(original).map(PathBuf::as_path)
    }

    /// `(original, duplicate)` pairs sorted by original path.
    #[must_use]
    pub fn duplicates(&self) -> Vec<(&Path, &Path)> {
        let mut pairs: Vec<(&Path, &Path)> = self
            .duplicates
            .iter()
            .map(|(orig, dup)| (orig.as_path(), dup.as_path()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Render the text report.
    #[must_use]
    pub fn result(&self) -> String {
        self.to_string()
    }

    /// Serializable snapshot of the index.
    #[must_use]
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            duplicates: self
                .duplicates()
                .into_iter()
                .map(|(original, duplicate)| DuplicatePair {
                    original: original.to_path_buf(),
                    duplicate: duplicate.to_path_buf(),
                })
                .collect(),
            total_files: self.total_files(),
            duplicate_count: self.duplicate_count(),
            total_duplicate_size: self.dupe_size,
            total_duplicate_size_readable: to_readable_size(self.dupe_size),
        }
    }
}

impl fmt::Display for DuplicateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DUPLICATES")?;
        for (key, val) in self.duplicates() {
            writeln!(f, "key: {}, val: {}", key.display(), val.display())?;
        }
        writeln!(f, "TOTAL FILES: {}", self.total_files())?;
        writeln!(f, "DUPLICATES: {}", self.duplicate_count())?;
        writeln!(f, "TOTAL DUPLICATE SIZE: {}", to_readable_size(self.dupe_size))
    }
}

/// One recorded duplicate relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    /// First path seen with the shared fingerprint
    pub original: PathBuf,
    /// Latest path seen with the same fingerprint
    pub duplicate: PathBuf,
}

/// Scan results for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Recorded duplicate relations
    pub duplicates: Vec<DuplicatePair>,
    /// Number of distinct fingerprints
    pub total_files: usize,
    /// Number of recorded duplicate relations
    pub duplicate_count: usize,
    /// Bytes occupied by duplicate copies
    pub total_duplicate_size: i64,
    /// `total_duplicate_size` formatted for display
    pub total_duplicate_size_readable: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::fingerprint_bytes;

    #[test]
    fn test_new_fingerprint_is_original() {
        let mut index = DuplicateIndex::new();
        let fp = fingerprint_bytes(b"a");
        index.add_entry(fp, PathBuf::from("/a"), 1);

        assert_eq!(index.total_files(), 1);
        assert_eq!(index.duplicate_count(), 0);
        assert_eq!(index.dupe_size(), 0);
        assert_eq!(index.original_of(&fp), Some(Path::new("/a")));
    }

    #[test]
    fn test_second_path_does_not_grow_index() {
        let mut index = DuplicateIndex::new();
        let fp = fingerprint_bytes(b"a");
        index.add_entry(fp, PathBuf::from("/a"), 10);
        index.add_entry(fp, PathBuf::from("/b"), 10);

        assert_eq!(index.total_files(), 1);
        assert_eq!(index.duplicate_count(), 1);
        assert_eq!(index.dupe_size(), 10);
        assert_eq!(index.original_of(&fp), Some(Path::new("/a")));
        assert_eq!(index.duplicate_of(Path::new("/a")), Some(Path::new("/b")));
    }

    #[test]
    fn test_latest_duplicate_replaces_earlier() {
        let mut index = DuplicateIndex::new();
        let fp = fingerprint_bytes(b"same");
        index.add_entry(fp, PathBuf::from("/one"), 7);
        index.add_entry(fp, PathBuf::from("/two"), 7);
        index.add_entry(fp, PathBuf::from("/three"), 7);

        assert_eq!(index.duplicate_count(), 1);
        assert_eq!(index.duplicate_of(Path::new("/one")), Some(Path::new("/three")));
        // Every copy after the first is counted
        assert_eq!(index.dupe_size(), 14);
    }

    #[test]
    fn test_result_empty() {
        let index = DuplicateIndex::new();
        assert_eq!(
            index.result(),
            "DUPLICATES\nTOTAL FILES: 0\nDUPLICATES: 0\nTOTAL DUPLICATE SIZE: 0 B\n"
        );
    }

    #[test]
    fn test_result_format() {
        let mut index = DuplicateIndex::new();
        index.add_entry(fingerprint_bytes(b"x"), PathBuf::from("dir/text.txt"), 41);
        index.add_entry(fingerprint_bytes(b"x"), PathBuf::from("dir/copy.txt"), 41);
        index.add_entry(fingerprint_bytes(b"y"), PathBuf::from("dir/other.txt"), 3);

        assert_eq!(
            index.result(),
            "DUPLICATES\n\
             key: dir/text.txt, val: dir/copy.txt\n\
             TOTAL FILES: 2\n\
             DUPLICATES: 1\n\
             TOTAL DUPLICATE SIZE: 41 B\n"
        );
    }

    #[test]
    fn test_summary_matches_counters() {
        let mut index = DuplicateIndex::new();
        index.add_entry(fingerprint_bytes(b"big"), PathBuf::from("/a"), 1_500_000);
        index.add_entry(fingerprint_bytes(b"big"), PathBuf::from("/b"), 1_500_000);

        let summary = index.summary();
        assert_eq!(summary.total_files, 1);
        assert_eq!(summary.duplicate_count, 1);
        assert_eq!(summary.total_duplicate_size, 1_500_000);
        assert_eq!(summary.total_duplicate_size_readable, "1.50 MB");
        assert_eq!(
            summary.duplicates,
            vec![DuplicatePair {
                original: PathBuf::from("/a"),
                duplicate: PathBuf::from("/b"),
            }]
        );
    }
}
