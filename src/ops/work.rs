//! Work-experience table operations.

use crate::backend::Record;
use crate::schema::{vocab, TableConfig, WORK};

use super::TableOps;

pub struct WorkOps;

impl TableOps for WorkOps {
    fn config(&self) -> &'static TableConfig {
        &WORK
    }

    fn summary(&self, record: &Record) -> String {
        let position = record
            .get_str("position")
            .unwrap_or_else(|| "(no position)".to_string());
        let company = record
            .get_str("company")
            .unwrap_or_else(|| "(no company)".to_string());
        let start = record
            .get_str("startDate")
            .unwrap_or_else(|| "?".to_string());
        let end = record
            .get_str("endDate")
            .unwrap_or_else(|| "present".to_string());
        let mut line = format!("{} at {} ({} to {})", position, company, start, end);
        if let Some(kind) = record.get_str("type") {
            line.push_str(&format!(", {}", kind));
        }
        line
    }

    fn creation_hints(&self) -> String {
        format!(
            "type values: {}\ndates use YYYY-MM-DD\nrequired to create: company, position, startDate, type",
            vocab::WORK_TYPES.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FieldMap, RecordId};
    use serde_json::json;

    #[test]
    fn test_summary_open_ended_role() {
        let mut fields = FieldMap::new();
        fields.insert("position".to_string(), json!("Engineer"));
        fields.insert("company".to_string(), json!("Acme"));
        fields.insert("startDate".to_string(), json!("2021-06-01"));
        fields.insert("type".to_string(), json!("full-time"));
        let record = Record::new(RecordId::new("w1").unwrap(), fields);
        assert_eq!(
            WorkOps.summary(&record),
            "Engineer at Acme (2021-06-01 to present), full-time"
        );
    }

    #[test]
    fn test_creation_hints_name_required_fields() {
        let hints = WorkOps.creation_hints();
        assert!(hints.contains("company, position, startDate, type"));
        assert!(hints.contains("YYYY-MM-DD"));
    }
}
