//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Indexing fingerprints by their first-seen path
//! - Recording duplicate relations and the bytes they occupy
//! - Rendering the scan report

pub mod index;

pub use index::{DuplicateIndex, DuplicatePair, ScanSummary};
