//! Field validation errors.
//!
//! Every variant carries the offending value plus the permitted
//! set/range/format, so the message alone tells the user what to fix.

use thiserror::Error;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field-level validation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("unknown field '{field}' for {table}. Valid fields: {valid}")]
    UnknownField {
        table: &'static str,
        field: String,
        valid: String,
    },

    #[error("invalid value '{value}' for {field}. Allowed values: {allowed}")]
    NotInEnum {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("{field} must be a number, got '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("{field} must be between {min} and {max}, got '{value}'")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("'{value}' is not a valid URL for {field}")]
    InvalidUrl { field: String, value: String },

    #[error("{field} must be a github.com URL with an owner/repo path, got '{value}'")]
    InvalidGithubUrl { field: String, value: String },

    #[error("{field} must be a date in YYYY-MM-DD format, got '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("invalid {field} entries: {invalid}. Known values: {hint}")]
    UnknownVocabEntries {
        field: String,
        invalid: String,
        hint: String,
    },

    #[error("{field} cannot be empty")]
    EmptyValue { field: String },

    #[error("{field} is managed through 'git image add/list/remove'")]
    ImageFieldDirectAssign { field: String },
}
