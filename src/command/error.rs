//! Command parsing errors.

use thiserror::Error;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Command-line parsing errors. Reported immediately; parsing never
/// touches state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'. Type 'help' for usage")]
    UnknownCommand(String),

    #[error("unknown table or verb '{0}'. Type 'help' for tables and commands")]
    UnknownGitToken(String),

    #[error("'{verb}' needs an argument: {usage}")]
    MissingArgument {
        verb: &'static str,
        usage: &'static str,
    },

    #[error("malformed assignment '{0}'. Expected <field>=<value>")]
    MalformedAssignment(String),

    #[error("'{0}' is not a valid image index")]
    InvalidImageIndex(String),

    #[error("unknown image sub-command '{0}'. Use add, list or remove")]
    UnknownImageVerb(String),
}
