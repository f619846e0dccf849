//! Human-readable byte counts.
//!
//! Sizes are formatted with decimal (1000-based) units. The unit table is
//! ordered largest-first; the first unit whose threshold is strictly exceeded
//! wins, and the value is rendered with exactly two fraction digits. Anything
//! that exceeds no threshold is rendered as a plain integer with a ` B` suffix.
//!
//! # Example
//!
//! ```
//! use dupescan::size::to_readable_size;
//!
//! assert_eq!(to_readable_size(125), "125 B");
//! assert_eq!(to_readable_size(1010), "1.01 KB");
//! assert_eq!(to_readable_size(1_988_909), "1.99 MB");
//! ```

/// A display unit: values strictly greater than `threshold` are divided by
/// `divisor` and tagged with `suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeUnit {
    /// Exclusive lower bound for selecting this unit
    pub threshold: i64,
    /// Divisor applied to the byte count
    pub divisor: i64,
    /// Unit label
    pub suffix: &'static str,
}

const KB: i64 = 1_000;
const MB: i64 = KB * 1_000;
const GB: i64 = MB * 1_000;
const TB: i64 = GB * 1_000;

/// Decimal units, largest first.
pub const UNITS: [SizeUnit; 4] = [
    SizeUnit {
        threshold: TB,
        divisor: TB,
        suffix: "TB",
    },
    SizeUnit {
        threshold: GB,
        divisor: GB,
        suffix: "GB",
    },
    SizeUnit {
        threshold: MB,
        divisor: MB,
        suffix: "MB",
    },
    SizeUnit {
        threshold: KB,
        divisor: KB,
        suffix: "KB",
    },
];

/// Format a byte count for display.
///
/// Total over `i64`: negative and small values fall through to the byte
/// branch.
#[must_use]
pub fn to_readable_size(bytes: i64) -> String {
    UNITS
        .iter()
        .find(|unit| bytes > unit.threshold)
        .map_or_else(
            || format!("{bytes} B"),
            |unit| format!("{:.2} {}", bytes as f64 / unit.divisor as f64, unit.suffix),
        )
}
