//! Links table operations.

use crate::backend::Record;
use crate::schema::{vocab, TableConfig, LINKS};

use super::TableOps;

pub struct LinkOps;

impl TableOps for LinkOps {
    fn config(&self) -> &'static TableConfig {
        &LINKS
    }

    fn summary(&self, record: &Record) -> String {
        let label = record
            .get_str("label")
            .unwrap_or_else(|| "(no label)".to_string());
        let url = record.get_str("url").unwrap_or_else(|| "(no url)".to_string());
        format!("{}: {}", label, url)
    }

    fn creation_hints(&self) -> String {
        format!(
            "label values: {}\nrequired to create: url, label",
            vocab::LINK_LABELS.join(", ")
        )
    }
}
