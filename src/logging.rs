//! Logging setup for DupeScan.
//!
//! Uses the `log` facade with an `env_logger` backend writing to stderr, so
//! the report on stdout stays clean. The level comes from, in order:
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only) or `-v`/`-vv` (debug/trace)
//! 3. Default: warn

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logger from CLI verbosity flags.
///
/// Safe to call more than once; later calls are ignored, which lets tests
/// drive [`crate::run_app`] repeatedly.
///
/// ```rust,no_run
/// dupescan::logging::init_logging(1, false);
/// log::debug!("visible with -v");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    // Timestamp and module path from -v up
    let with_module = verbose >= 1;
    builder.format(move |buf, record| {
        let level_style = buf.default_level_style(record.level());
        if with_module {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                record.level(),
                record.args()
            )
        }
    });

    if builder.try_init().is_ok() {
        log::debug!("Logging initialized at level: {:?}", log::max_level());
    }
}

/// Map CLI flags to a level filter. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
