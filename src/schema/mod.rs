//! Schema module: table registry, field definitions, vocabularies.
//!
//! Everything here is static and immutable for the lifetime of the
//! process; the dispatcher and operations consult it by [`TableKey`].

mod fields;
mod registry;
pub mod vocab;

pub use fields::{FieldDef, FieldKind};
pub use registry::{
    alias_table, config_for, lookup_alias, TableConfig, TableKey, EDUCATION, LINKS, PROJECTS,
    USERS, WORK,
};
