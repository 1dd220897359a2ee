//! Error types for the room relay core.
//!
//! The HTTP edge maps these to status codes:
//! - [`ChatError::Validation`] => 400
//! - [`ChatError::Storage`]    => 500
//!
//! [`LogWriteError`] never reaches a caller; the message service logs
//! and drops it.

use thiserror::Error;

/// Errors returned by the message and typing services.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required field was absent or blank. Carries the field name.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The storage backend could not complete the operation.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Failure to append a line to the audit log.
#[derive(Debug, Error)]
#[error("audit log write failed: {0}")]
pub struct LogWriteError(pub String);
