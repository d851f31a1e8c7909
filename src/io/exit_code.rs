//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - every file scanned, interface written
//! - `1`: General error - unspecified failure
//! - `3`: Partial failure - some files could not be scanned
//! - `4-7`: Specific fatal errors
//! - `126-255`: Reserved by shell

use crate::error::{AssembleError, ExtractError};

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Some files failed to scan (code 3)
    PartialFailure = 3,

    /// No eligible source file under the root (code 4)
    NoSourceFiles = 4,

    /// File I/O error, including output write failures (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Root path missing or not a directory (code 7)
    InvalidRoot = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Convert a fatal `ExtractError` to the appropriate exit code.
    pub fn from_error(error: &ExtractError) -> Self {
        match error {
            ExtractError::PathNotFound { .. }
            | ExtractError::PathIsFile { .. }
            | ExtractError::RootAccess { .. } => ExitCode::InvalidRoot,
            ExtractError::NoSourceFiles { .. } => ExitCode::NoSourceFiles,
            ExtractError::FileRead { .. } => ExitCode::IoError,
            ExtractError::WorkerPanicked { .. } | ExtractError::Pool(_) => ExitCode::GeneralError,
        }
    }

    /// Output failures are always I/O errors
    pub fn from_assemble_error(_error: &AssembleError) -> Self {
        ExitCode::IoError
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::PartialFailure => "Some files could not be scanned",
            ExitCode::NoSourceFiles => "No source files",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::InvalidRoot => "Invalid root path",
        }
    }
}
