//! Report writers.
//!
//! - Text: the `DUPLICATES` report produced by [`DuplicateIndex::result`]
//! - JSON: [`json::JsonOutput`] for scripting

pub mod json;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::duplicates::DuplicateIndex;
use crate::scanner::ScanStats;

pub use json::JsonOutput;

/// Write the report for a finished scan in the requested format.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    root: &Path,
    index: &DuplicateIndex,
    stats: ScanStats,
) -> Result<()> {
    match format {
        OutputFormat::Text => write!(writer, "{index}")?,
        OutputFormat::Json => JsonOutput::new(root, index.summary(), stats).write_to(writer)?,
    }
    writer.flush()?;
    Ok(())
}
