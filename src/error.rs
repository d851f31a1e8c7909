//! Error types for signature extraction and interface assembly
//!
//! This module provides structured error types using thiserror. Errors fall
//! into two groups:
//! - fatal errors that abort an extraction before any file is scanned
//! - per-file errors that are collected into a [`MultiError`] and returned
//!   next to the signatures that were extracted successfully

use crate::indexing::pool::PoolError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction operations
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The root path does not exist
    #[error("Root path '{path}' does not exist")]
    PathNotFound { path: PathBuf },

    /// The root path exists but is a regular file
    #[error("Root path '{path}' is not a directory")]
    PathIsFile { path: PathBuf },

    /// The root path could not be inspected for another reason
    #[error("Failed to inspect root path '{path}': {source}")]
    RootAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No eligible source file below the root path
    #[error("The directory '{path}' does not contain any '.{extension}' source files")]
    NoSourceFiles { path: PathBuf, extension: String },

    /// A single file could not be opened or read
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scan task panicked inside the worker pool
    #[error("Scan task panicked: {message}")]
    WorkerPanicked { message: String },

    /// The worker pool could not be started or refused work
    #[error("Worker pool error: {0}")]
    Pool(#[from] PoolError),
}

impl ExtractError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::PathNotFound { .. } => "PATH_NOT_FOUND",
            Self::PathIsFile { .. } => "PATH_IS_FILE",
            Self::RootAccess { .. } => "ROOT_ACCESS_ERROR",
            Self::NoSourceFiles { .. } => "NO_SOURCE_FILES",
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::WorkerPanicked { .. } => "WORKER_PANICKED",
            Self::Pool(_) => "POOL_ERROR",
        }
        .to_string()
    }

    /// Whether this error aborts the whole extraction.
    ///
    /// Per-file errors are collected instead and never stop sibling scans.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound { .. }
                | Self::PathIsFile { .. }
                | Self::RootAccess { .. }
                | Self::NoSourceFiles { .. }
                | Self::Pool(_)
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::PathNotFound { .. } => vec![
                "Check the --root argument for typos",
                "Relative paths are resolved against the current directory",
            ],
            Self::PathIsFile { .. } => {
                vec!["Pass the directory containing the file, not the file itself"]
            }
            Self::NoSourceFiles { .. } => vec![
                "Test files (*_test.go) are never scanned",
                "Check extraction.source_extension in .ifacegen/settings.toml",
            ],
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is valid UTF-8",
            ],
            _ => vec![],
        }
    }
}

/// Errors raised while rendering an interface declaration
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Failed to write interface declaration: {source}")]
    Write {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to prepare output file '{path}': {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type alias for assembly operations
pub type AssembleResult<T> = Result<T, AssembleError>;

/// An ordered collection of per-file errors reported as one error value.
///
/// An empty `MultiError` is not an error. Always pass it through
/// [`MultiError::into_error`] or [`MultiError::into_result`] before handing it
/// to a caller so "no failures" is never mistaken for a failure.
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<ExtractError>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ExtractError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractError> {
        self.errors.iter()
    }

    /// `None` when no error was collected, `Some(self)` otherwise.
    #[must_use]
    pub fn into_error(self) -> Option<MultiError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// `Ok(())` when no error was collected, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), MultiError> {
        match self.into_error() {
            None => Ok(()),
            Some(errors) => Err(errors),
        }
    }

    pub fn into_inner(self) -> Vec<ExtractError> {
        self.errors
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "[{i}] {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

impl FromIterator<ExtractError> for MultiError {
    fn from_iter<I: IntoIterator<Item = ExtractError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MultiError {
    type Item = ExtractError;
    type IntoIter = std::vec::IntoIter<ExtractError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a ExtractError;
    type IntoIter = std::slice::Iter<'a, ExtractError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Helper trait for attaching a file path to I/O errors
pub trait ErrorContext<T> {
    /// Convert into [`ExtractError::FileRead`] for the given path
    fn with_path(self, path: &std::path::Path) -> Result<T, ExtractError>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn with_path(self, path: &std::path::Path) -> Result<T, ExtractError> {
        self.map_err(|source| ExtractError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}
