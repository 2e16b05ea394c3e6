//! Error types and handling infrastructure for the beneficiary browser.
//!
//! Library code returns [`BrowserError`] through the crate-wide [`Result`] alias. The binary
//! wraps these in `anyhow` for top-level reporting. None of these errors are fatal to the UI:
//! the browser turns them into status messages and notices.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for browser operations.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// File system related errors (permission denied, read failures, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Extension is not one of the spreadsheet formats we can read
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// The workbook or CSV could not be decoded into rows
    #[error("Failed to parse spreadsheet: {message}")]
    ParseError { message: String },

    /// The file has no bytes at all
    #[error("File is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

impl BrowserError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ParseError with a descriptive message
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BrowserError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}

impl From<csv::Error> for BrowserError {
    fn from(err: csv::Error) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<calamine::Error> for BrowserError {
    fn from(err: calamine::Error) -> Self {
        Self::parse(err.to_string())
    }
}
