//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the DupeScan application.
///
/// - 0: Success (scan completed and the report was printed)
/// - 1: General error (listing, read or configuration failure)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and the report was written.
    Success = 0,
    /// General error: The scan was aborted by an error.
    GeneralError = 1,
    /// Interrupted: Scan was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::Interrupted => "DS130",
        }
    }

    /// Pick the exit code for an error that aborted the run.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err
            .downcast_ref::<crate::scanner::ScanError>()
            .is_some_and(|e| matches!(e, crate::scanner::ScanError::Interrupted))
        {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_for_error() {
        let err = anyhow::Error::new(ScanError::Interrupted);
        assert_eq!(ExitCode::for_error(&err), ExitCode::Interrupted);

        let err = anyhow::Error::new(ScanError::NotFound(PathBuf::from("/missing")));
        assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_structured_error_serializes() {
        let err = anyhow::Error::new(ScanError::NotFound(PathBuf::from("/missing")));
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        let json = serde_json::to_value(&structured).unwrap();

        assert_eq!(json["code"], "DS001");
        assert_eq!(json["exit_code"], 1);
        assert_eq!(json["message"], "Path not found: /missing");
        assert_eq!(json["interrupted"], false);
    }
}
