//! Ctrl+C handling.
//!
//! A shared `AtomicBool` is set when the user interrupts the process. The
//! traverser checks it before every directory listing and every file, and
//! stops with [`crate::scanner::ScanError::Interrupted`], which the entry
//! point maps to exit code 130.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`Self::request_shutdown`] called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Set the flag manually.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clone of the flag for [`crate::scanner::TraverseConfig::with_shutdown_flag`].
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler.
///
/// Repeated calls (for example from tests running [`crate::run_app`] in
/// the same process) return the already installed handler with its flag
/// cleared. If another component registered a handler first, an unhooked
/// handler is returned; it still honours [`ShutdownHandler::request_shutdown`].
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if the platform refuses the hook.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Stopping scan...");
        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {}
        Err(ctrlc::Error::MultipleHandlers) => {
            log::debug!("Ctrl+C handler already registered, using unhooked handler");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(GLOBAL_HANDLER.get_or_init(|| handler).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_reset() {
        let handler = ShutdownHandler::new();
        assert!(!handler.is_shutdown_requested());

        handler.request_shutdown();
        assert!(handler.is_shutdown_requested());

        handler.reset();
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_flag_is_shared() {
        let handler = ShutdownHandler::new();
        let flag = handler.get_flag();
        let cloned = handler.clone();

        flag.store(true, Ordering::SeqCst);
        assert!(handler.is_shutdown_requested());
        assert!(cloned.is_shutdown_requested());
    }

    #[test]
    fn test_install_twice_returns_cleared_handler() {
        let first = install_handler().unwrap();
        first.request_shutdown();

        let second = install_handler().unwrap();
        assert!(!second.is_shutdown_requested());
    }
}
