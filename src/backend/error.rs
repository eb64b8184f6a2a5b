//! Mutation executor errors.

use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors surfaced by the external mutation executor.
#[derive(Debug, Clone, Error)]
pub enum MutationError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("mutation rejected: {0}")]
    Rejected(String),

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Invalid record identifier.
#[derive(Debug, Clone, Error)]
pub enum InvalidIdError {
    #[error("record id cannot be empty")]
    Empty,

    #[error("record id cannot contain whitespace")]
    Whitespace,
}
