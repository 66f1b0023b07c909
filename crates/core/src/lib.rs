//! Shared primitives for all Rust crates in Eventspout.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Eventspout crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Outbound notification delivery failed.
    #[error("publish error: {0}")]
    Publish(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
