//! The mutation executor seam.
//!
//! `commit`, `rm` and `image` are the only operations that cross this
//! boundary; everything else in the core is pure. The host application
//! supplies the implementation that talks to its persistence layer.

use crate::schema::TableKey;

use super::error::MutationResult;
use super::record::{FieldMap, Record, RecordId};

/// Opaque handle for a pending image upload, produced by
/// [`MutationExecutor::generate_upload_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHandle(pub String);

impl UploadHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// External collaborator performing actual create/update/delete against
/// the backing store.
///
/// All methods are synchronous; calls are issued one at a time per
/// session. Bounding call time (timeouts) is the implementation's
/// responsibility; the core blocks until a call returns.
pub trait MutationExecutor {
    /// Read the current record set for a table, scoped to an owner.
    fn query(&self, table: TableKey, owner: &str) -> MutationResult<Vec<Record>>;

    /// Create a new record from the given fields.
    fn create(&self, table: TableKey, owner: &str, fields: &FieldMap) -> MutationResult<Record>;

    /// Update an existing record with the given fields.
    fn update(&self, table: TableKey, id: &RecordId, fields: &FieldMap) -> MutationResult<Record>;

    /// Delete a record.
    fn delete(&self, table: TableKey, id: &RecordId) -> MutationResult<()>;

    /// Reserve an upload slot for a pending image.
    fn generate_upload_target(&self) -> MutationResult<UploadHandle>;

    /// Resolve a completed upload to its public URL.
    fn resolve_uploaded_url(&self, handle: &UploadHandle) -> MutationResult<String>;
}
