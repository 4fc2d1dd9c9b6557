//! # Error Module
//!
//! Error types for the quote-of-the-moment tool.
//!
//! ## Design Principles
//! - **Never fatal** - every failure leaves the app usable
//! - **Include context** - URLs, status codes, paths
//! - **User-friendly messages** - the front end prints these verbatim

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum QuoteMomentError {
    #[error("Network error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Copy failed: {0}")]
    Copy(#[from] CopyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors from the quote fetch collaborator
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Quote API returned {status}")]
    Status { status: u16 },

    #[error("Quote API returned an unusable payload: {0}")]
    InvalidPayload(String),
}

/// Errors from the durable key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to open storage at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Storage query failed: {0}")]
    QueryFailed(String),

    #[error("Storage write failed for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Storage at {path} is unusable. Delete this file and try again.")]
    Corrupted { path: PathBuf },
}

/// Errors from the clipboard collaborator
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard is not available on this system: {0}")]
    Unavailable(String),

    #[error("Permission denied while writing to the clipboard")]
    PermissionDenied,

    #[error("Clipboard command {command} failed: {reason}")]
    WriteFailed { command: String, reason: String },
}

/// Errors from copying the displayed quote
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("No quote is displayed yet")]
    NoCurrentQuote,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, QuoteMomentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_code() {
        let error = FetchError::Status { status: 503 };
        assert_eq!(error.to_string(), "Quote API returned 503");
    }

    #[test]
    fn storage_error_suggests_recovery() {
        let error = StorageError::Corrupted {
            path: PathBuf::from("/data/storage.db"),
        };
        let message = error.to_string();
        assert!(message.contains("/data/storage.db"));
        assert!(message.contains("Delete this file"));
    }

    #[test]
    fn copy_error_wraps_clipboard_failure() {
        let error: CopyError = ClipboardError::PermissionDenied.into();
        assert!(matches!(error, CopyError::Clipboard(ClipboardError::PermissionDenied)));
        assert!(error.to_string().contains("Permission denied"));
    }

    #[test]
    fn top_level_error_converts_from_fetch() {
        let error: QuoteMomentError = FetchError::Status { status: 404 }.into();
        assert!(error.to_string().starts_with("Network error"));
    }
}
