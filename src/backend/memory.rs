//! In-memory mutation executor, used by the binary and tests.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde_json::Value;
use ulid::Ulid;

use crate::schema::TableKey;

use super::error::{MutationError, MutationResult};
use super::executor::{MutationExecutor, UploadHandle};
use super::record::{FieldMap, Record, RecordId};

#[derive(Default)]
struct Store {
    /// (table, owner) → records, in insertion order.
    records: BTreeMap<(TableKey, String), Vec<Record>>,
    uploads: u64,
}

/// A process-local backend keeping all records in memory.
///
/// Each owner gets one implicit user record, seeded on first query of
/// the users table.
#[derive(Default)]
pub struct MemoryBackend {
    store: RwLock<Store>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id() -> RecordId {
        // Ulid generation never produces an invalid id token.
        RecordId::new(Ulid::new().to_string()).unwrap_or_else(|_| unreachable!())
    }

    fn seed_user(owner: &str) -> Record {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), Value::String(owner.to_string()));
        Record::new(Self::mint_id(), fields)
    }
}

impl MutationExecutor for MemoryBackend {
    fn query(&self, table: TableKey, owner: &str) -> MutationResult<Vec<Record>> {
        let mut store = self.store.write();
        let entry = store
            .records
            .entry((table, owner.to_string()))
            .or_default();
        if table == TableKey::Users && entry.is_empty() {
            entry.push(Self::seed_user(owner));
        }
        Ok(entry.clone())
    }

    fn create(&self, table: TableKey, owner: &str, fields: &FieldMap) -> MutationResult<Record> {
        let record = Record::new(Self::mint_id(), fields.clone());
        let mut store = self.store.write();
        store
            .records
            .entry((table, owner.to_string()))
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn update(&self, table: TableKey, id: &RecordId, fields: &FieldMap) -> MutationResult<Record> {
        let mut store = self.store.write();
        for records in store
            .records
            .iter_mut()
            .filter_map(|((t, _), v)| (*t == table).then_some(v))
        {
            if let Some(record) = records.iter_mut().find(|r| &r.id == id) {
                for (name, value) in fields {
                    record.fields.insert(name.clone(), value.clone());
                }
                return Ok(record.clone());
            }
        }
        Err(MutationError::NotFound(id.to_string()))
    }

    fn delete(&self, table: TableKey, id: &RecordId) -> MutationResult<()> {
        let mut store = self.store.write();
        for records in store
            .records
            .iter_mut()
            .filter_map(|((t, _), v)| (*t == table).then_some(v))
        {
            if let Some(pos) = records.iter().position(|r| &r.id == id) {
                records.remove(pos);
                return Ok(());
            }
        }
        Err(MutationError::NotFound(id.to_string()))
    }

    fn generate_upload_target(&self) -> MutationResult<UploadHandle> {
        let mut store = self.store.write();
        store.uploads += 1;
        Ok(UploadHandle(format!("upload-{}", store.uploads)))
    }

    fn resolve_uploaded_url(&self, handle: &UploadHandle) -> MutationResult<String> {
        Ok(format!("memory://uploads/{}", handle.as_str()))
    }
}
