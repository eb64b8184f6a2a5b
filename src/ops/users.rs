//! Users table operations.
//!
//! The profile is a single implicit record per user: it cannot be
//! created, deleted or targeted, and commit always updates it.

use crate::backend::Record;
use crate::schema::{vocab, TableConfig, USERS};

use super::error::{OpError, OpResult};
use super::{common, OpCtx, TableOps};

pub struct UserOps;

impl TableOps for UserOps {
    fn config(&self) -> &'static TableConfig {
        &USERS
    }

    fn summary(&self, record: &Record) -> String {
        let name = record.get_str("name").unwrap_or_else(|| "(no name)".to_string());
        match record.get_str("headline") {
            Some(headline) => format!("{} - {}", name, headline),
            None => name,
        }
    }

    fn creation_hints(&self) -> String {
        format!(
            "The profile record is created automatically.\ninterests values: {}",
            vocab::vocab_hint(vocab::INTERESTS, 10)
        )
    }

    fn target(&self, _id: &str, _ctx: &mut OpCtx<'_>) -> OpResult<String> {
        Err(OpError::TargetUnsupported(USERS.display_name))
    }

    /// Commit updates the implicit profile record; there is no create
    /// path for users.
    fn commit(&self, message: Option<&str>, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        if ctx.state.staged.is_empty() {
            return common::commit(self, message, ctx);
        }
        if ctx.state.context.target.is_none() {
            let profile = ctx.records.first().cloned().ok_or(OpError::NoUser)?;
            ctx.state.set_target(profile);
        }
        common::commit(self, message, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FieldMap, MutationExecutor, RecordId};
    use crate::ops::testing::RecordingExecutor;
    use crate::schema::TableKey;
    use crate::state::GitState;
    use serde_json::json;

    #[test]
    fn test_summary_includes_headline() {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), json!("Alice"));
        fields.insert("headline".to_string(), json!("Rustacean"));
        let record = Record::new(RecordId::new("u1").unwrap(), fields);
        assert_eq!(UserOps.summary(&record), "Alice - Rustacean");
    }

    #[test]
    fn test_target_not_supported() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Users);
        let records = executor.inner.query(TableKey::Users, "alice").unwrap();
        let mut ctx = OpCtx {
            state: &mut state,
            records: &records,
            executor: &executor,
            user: Some("alice"),
        };
        assert!(matches!(
            UserOps.target("u1", &mut ctx),
            Err(OpError::TargetUnsupported(_))
        ));
    }

    #[test]
    fn test_commit_updates_implicit_record() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Users);
        state.stage("headline", json!("Builds things"));
        let records = executor.inner.query(TableKey::Users, "alice").unwrap();

        let reply = {
            let mut ctx = OpCtx {
                state: &mut state,
                records: &records,
                executor: &executor,
                user: Some("alice"),
            };
            UserOps.commit(None, &mut ctx).unwrap()
        };
        assert!(reply.contains("Updated user"));
        assert_eq!(executor.updates.get(), 1);
        assert_eq!(executor.creates.get(), 0);
        assert!(state.staged.is_empty());

        let refreshed = executor.inner.query(TableKey::Users, "alice").unwrap();
        assert_eq!(
            refreshed[0].get_str("headline"),
            Some("Builds things".to_string())
        );
    }

    #[test]
    fn test_commit_with_nothing_staged() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Users);
        let records = executor.inner.query(TableKey::Users, "alice").unwrap();
        let mut ctx = OpCtx {
            state: &mut state,
            records: &records,
            executor: &executor,
            user: Some("alice"),
        };
        let reply = UserOps.commit(None, &mut ctx).unwrap();
        assert!(reply.contains("nothing to commit"));
        assert_eq!(executor.updates.get(), 0);
    }
}
