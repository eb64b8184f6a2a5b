//! Table operations: the per-entity operation contract and its
//! implementations.
//!
//! Each entity kind implements [`TableOps`]; the shared state-machine
//! logic lives in `common` so the per-table code is just schema hooks
//! (summary formatting, creation hints) and the few genuine overrides
//! (users cannot target, only projects handle images).

pub mod common;
mod education;
mod error;
mod links;
mod projects;
mod users;
mod work;

pub use education::EducationOps;
pub use error::{OpError, OpResult};
pub use links::LinkOps;
pub use projects::ProjectOps;
pub use users::UserOps;
pub use work::WorkOps;

use crate::backend::{MutationExecutor, Record};
use crate::command::{AddArgs, ImageCommand};
use crate::schema::{TableConfig, TableKey};
use crate::state::GitState;

/// Everything an operation call receives: the mutable staging state, a
/// read-only snapshot of the table's records (fetched fresh by the
/// caller on each dispatch), the mutation executor, and the resolved
/// current user, if any.
pub struct OpCtx<'a> {
    pub state: &'a mut GitState,
    pub records: &'a [Record],
    pub executor: &'a dyn MutationExecutor,
    pub user: Option<&'a str>,
}

/// The operation contract shared by all five entity kinds.
///
/// `add`, `status`, `diff`, `show`, `target` and `reset` are pure over
/// the state; `commit` and `rm` (and `image` on projects) are the only
/// operations that reach the mutation executor.
pub trait TableOps: Sync {
    /// Static table metadata.
    fn config(&self) -> &'static TableConfig;

    /// One line of identity/headline info for a record.
    fn summary(&self, record: &Record) -> String;

    /// Enum/vocabulary hints shown when `show` finds no records.
    fn creation_hints(&self) -> String;

    fn add(&self, args: &AddArgs, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::add(self, args, ctx)
    }

    fn status(&self, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::status(self.config(), ctx.state)
    }

    fn diff(&self, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::diff(self.config(), ctx.state)
    }

    fn show(&self, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::show(self, ctx.records)
    }

    fn target(&self, id: &str, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::target(self, id, ctx)
    }

    fn commit(&self, message: Option<&str>, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::commit(self, message, ctx)
    }

    fn reset(&self, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::reset(self.config(), ctx.state)
    }

    fn rm(&self, answer: Option<&str>, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        common::rm(self, answer, ctx)
    }

    /// Image sub-verbs; only entities with image fields override this.
    fn image(&self, cmd: &ImageCommand, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        let _ = (cmd, ctx);
        Err(OpError::UnsupportedVerb {
            table: self.config().display_name,
            verb: "image",
        })
    }
}

/// Static registry: table key → operation implementation.
pub fn ops_for(key: TableKey) -> &'static dyn TableOps {
    match key {
        TableKey::Users => &UserOps,
        TableKey::Links => &LinkOps,
        TableKey::Projects => &ProjectOps,
        TableKey::Education => &EducationOps,
        TableKey::Work => &WorkOps,
    }
}
