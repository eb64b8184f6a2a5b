//! Record types shared between the core and the mutation executor.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::InvalidIdError;

/// Field name → value map, the shape of both staged changes and the
/// editable portion of a record.
pub type FieldMap = BTreeMap<String, Value>;

/// A validated record identifier.
///
/// Backends mint ulid-shaped ids, but any non-empty token without
/// whitespace is accepted so the core stays agnostic of the id scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidIdError::Empty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(InvalidIdError::Whitespace);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record as seen by the core: a stable id plus its field map.
///
/// Records are read-only snapshots supplied fresh on each dispatch;
/// the core never mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: RecordId, fields: FieldMap) -> Self {
        Self { id, fields }
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field as a display string, or `None` if absent.
    pub fn get_str(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(render_value)
    }
}

/// Render a field value for human-readable output.
///
/// Strings print bare, lists print bracketed/comma-joined.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_validation() {
        assert!(RecordId::new("01ABC").is_ok());
        assert!(matches!(RecordId::new(""), Err(InvalidIdError::Empty)));
        assert!(matches!(
            RecordId::new("a b"),
            Err(InvalidIdError::Whitespace)
        ));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("hi")), "hi");
        assert_eq!(render_value(&json!(3.5)), "3.5");
        assert_eq!(render_value(&json!(["React", "Rust"])), "[React, Rust]");
        assert_eq!(render_value(&Value::Null), "(empty)");
    }
}
