//! Command module: line grammar and parsed representation.

mod ast;
mod error;
mod parser;

pub use ast::{AddArgs, Command, GitCommand, ImageCommand};
pub use error::{ParseError, ParseResult};
pub use parser::Parser;
