//! Education table operations.

use crate::backend::Record;
use crate::schema::{vocab, TableConfig, EDUCATION};

use super::TableOps;

pub struct EducationOps;

impl TableOps for EducationOps {
    fn config(&self) -> &'static TableConfig {
        &EDUCATION
    }

    fn summary(&self, record: &Record) -> String {
        let institution = record
            .get_str("institution")
            .unwrap_or_else(|| "(no institution)".to_string());
        let kind = record
            .get_str("type")
            .unwrap_or_else(|| "unspecified".to_string());
        let mut line = format!("{} ({})", institution, kind);
        if let Some(degree) = record.get_str("degree") {
            line.push_str(&format!(", {}", degree));
        }
        match (record.get_str("startYear"), record.get_str("endYear")) {
            (Some(start), Some(end)) => line.push_str(&format!(", {}-{}", start, end)),
            (Some(start), None) => line.push_str(&format!(", {}-", start)),
            _ => {}
        }
        line
    }

    fn creation_hints(&self) -> String {
        format!(
            "type values: {}\ngpa range: 0.0-4.0, years: 1900-2100\nrequired to create: institution, type",
            vocab::EDUCATION_TYPES.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FieldMap, RecordId};
    use serde_json::json;

    #[test]
    fn test_summary_with_years() {
        let mut fields = FieldMap::new();
        fields.insert("institution".to_string(), json!("MIT"));
        fields.insert("type".to_string(), json!("bachelors"));
        fields.insert("degree".to_string(), json!("BSc"));
        fields.insert("startYear".to_string(), json!(2018));
        fields.insert("endYear".to_string(), json!(2022));
        let record = Record::new(RecordId::new("e1").unwrap(), fields);
        assert_eq!(
            EducationOps.summary(&record),
            "MIT (bachelors), BSc, 2018-2022"
        );
    }

    #[test]
    fn test_creation_hints_list_types() {
        let hints = EducationOps.creation_hints();
        for kind in vocab::EDUCATION_TYPES {
            assert!(hints.contains(kind));
        }
    }
}
