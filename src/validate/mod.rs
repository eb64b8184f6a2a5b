//! Validation module: pure field-level checks and coercion.

mod error;
mod validator;

pub use error::{ValidationError, ValidationResult};
pub use validator::{parse_list, strip_quotes, validate_field};
