//! Backend module: record types and the mutation executor seam.

mod error;
mod executor;
mod memory;
mod record;

pub use error::{InvalidIdError, MutationError, MutationResult};
pub use executor::{MutationExecutor, UploadHandle};
pub use memory::MemoryBackend;
pub use record::{render_value, FieldMap, Record, RecordId};
