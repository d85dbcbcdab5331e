//! # Session Storage Errors
//!
//! ```text
//! std::io::Error / serde_json::Error
//!        │
//!        ▼
//! SessionError (this module)
//!        │
//!        ▼
//! ApiError (storefront app) ← only when the shopper asked for the save
//! ```
//!
//! Autosave failures stop at the app: they are logged and dropped.

use thiserror::Error;

/// Errors from reading or writing a saved session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem failure.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The saved file is not a valid session blob.
    #[error("Session file is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session storage operations.
pub type SessionResult<T> = Result<T, SessionError>;
