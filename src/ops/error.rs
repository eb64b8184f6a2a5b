//! Table operation errors.
//!
//! These never escape the session as errors: the dispatcher renders
//! them into result strings. Each message carries an actionable next
//! step.

use thiserror::Error;

use crate::backend::MutationError;
use crate::validate::ValidationError;

/// Result type for table operations.
pub type OpResult<T> = Result<T, OpError>;

/// Errors raised by table operations.
#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An external mutation call failed. State is left exactly as it
    /// was before the call so the user can retry.
    #[error("{op} failed: {source}")]
    Mutation {
        op: &'static str,
        #[source]
        source: MutationError,
    },

    #[error("no record targeted. Target one first with 'git add -m <id>'")]
    NoTarget,

    #[error("targeting is not supported for {0}: the profile is a single implicit record")]
    TargetUnsupported(&'static str),

    #[error("no {table} record found with id '{id}'. Use 'git show' to list records")]
    RecordNotFound { table: &'static str, id: String },

    #[error("cannot create a new {table} record, missing required fields: {missing}")]
    MissingRequired {
        table: &'static str,
        missing: String,
    },

    #[error("no user context resolved; sign in before committing new records")]
    NoUser,

    #[error("creating {0} records is not supported")]
    CreateUnsupported(&'static str),

    #[error("updating {0} records is not supported")]
    UpdateUnsupported(&'static str),

    #[error("deleting {0} records is not supported")]
    DeleteUnsupported(&'static str),

    #[error("{table} has no '{verb}' operation")]
    UnsupportedVerb {
        table: &'static str,
        verb: &'static str,
    },

    #[error("image index {index} is out of range. Valid range: 0-{max}")]
    ImageIndexOutOfRange { index: usize, max: usize },

    #[error("no images attached or staged for this record")]
    NoImages,
}

impl OpError {
    /// Wrap a mutation failure with the operation that issued it.
    pub fn mutation(op: &'static str) -> impl FnOnce(MutationError) -> OpError {
        move |source| OpError::Mutation { op, source }
    }
}
