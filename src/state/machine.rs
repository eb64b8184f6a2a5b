//! The git-style staging state machine.
//!
//! All transitions are pure: nothing here performs I/O. The embedding
//! session owns the single living [`GitState`] and threads it through
//! every dispatch; it is transient and reset when the session ends.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::backend::{render_value, Record};
use crate::schema::TableKey;

/// Reserved staged key carrying a pending-upload path. Distinct from a
/// committed field: it is resolved to a URL at commit time, never sent
/// to the backend as-is.
pub const IMAGE_UPLOAD_KEY: &str = "_imageUpload";

/// Targeting mode, derived from the context fields rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// No record targeted, nothing staged.
    Untargeted,
    /// An existing record is targeted; commit updates it.
    TargetingExisting,
    /// Fields staged with no target; commit creates a new record.
    CreatingNew,
}

/// The current targeting context.
#[derive(Debug, Clone, Default)]
pub struct GitContext {
    /// Which table is active; `None` means no table targeted yet.
    pub table: Option<TableKey>,
    /// The existing record being modified, if any.
    pub target: Option<Record>,
    /// True iff `target` is set and commit should update, not create.
    pub modifying: bool,
    /// A deletion prompt has been issued and awaits yes/no. Explicit so
    /// an unrelated `rm` can never be mistaken for a confirmation.
    pub pending_deletion: bool,
}

/// Staging state: targeting context plus uncommitted field edits.
#[derive(Debug, Clone, Default)]
pub struct GitState {
    pub context: GitContext,
    pub staged: BTreeMap<String, Value>,
}

impl GitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active table.
    pub fn table(&self) -> Option<TableKey> {
        self.context.table
    }

    /// Derive the targeting mode from the context fields.
    pub fn mode(&self) -> TargetMode {
        if self.context.modifying && self.context.target.is_some() {
            TargetMode::TargetingExisting
        } else if !self.staged.is_empty() {
            TargetMode::CreatingNew
        } else {
            TargetMode::Untargeted
        }
    }

    /// Switch the active table. Unconditionally clears staged changes
    /// and targeting: nothing carries across tables.
    pub fn switch_table(&mut self, table: TableKey) {
        self.context = GitContext {
            table: Some(table),
            ..GitContext::default()
        };
        self.staged.clear();
    }

    /// Target an existing record for modification. Staged edits survive
    /// re-targeting; a pending deletion does not.
    pub fn set_target(&mut self, record: Record) {
        self.context.target = Some(record);
        self.context.modifying = true;
        self.context.pending_deletion = false;
    }

    /// Drop the target without touching staged changes.
    pub fn clear_target(&mut self) {
        self.context.target = None;
        self.context.modifying = false;
        self.context.pending_deletion = false;
    }

    /// Stage a field edit.
    pub fn stage(&mut self, field: impl Into<String>, value: Value) {
        self.staged.insert(field.into(), value);
    }

    /// Discard all staged changes and detarget. Returns how many staged
    /// fields were discarded.
    pub fn reset(&mut self) -> usize {
        let discarded = self.staged.len();
        self.staged.clear();
        self.clear_target();
        discarded
    }

    /// Clear staging and targeting after a successful commit or delete.
    pub fn complete_mutation(&mut self) {
        self.staged.clear();
        self.clear_target();
    }

    /// Cancel a pending deletion prompt. Called for every command that
    /// is not an `rm` confirmation.
    pub fn cancel_pending_deletion(&mut self) {
        self.context.pending_deletion = false;
    }

    /// Render the state for the `context` debug verb.
    pub fn render(&self) -> String {
        let table = self
            .context
            .table
            .map(|t| t.as_str())
            .unwrap_or("(none)");
        let target = self
            .context
            .target
            .as_ref()
            .map(|r| r.id.to_string())
            .unwrap_or_else(|| "(none)".to_string());
        let mode = match self.mode() {
            TargetMode::Untargeted => "untargeted",
            TargetMode::TargetingExisting => "modifying existing record",
            TargetMode::CreatingNew => "creating new record",
        };

        let mut out = format!(
            "table: {}\ntarget: {}\nmode: {}\npending deletion: {}\nstaged: {}",
            table,
            target,
            mode,
            self.context.pending_deletion,
            self.staged.len()
        );
        for (field, value) in &self.staged {
            out.push_str(&format!("\n  {} = {}", field, render_value(value)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FieldMap, RecordId};
    use serde_json::json;

    fn record(id: &str) -> Record {
        Record::new(RecordId::new(id).unwrap(), FieldMap::new())
    }

    #[test]
    fn test_mode_derivation() {
        let mut state = GitState::new();
        assert_eq!(state.mode(), TargetMode::Untargeted);

        state.stage("name", json!("x"));
        assert_eq!(state.mode(), TargetMode::CreatingNew);

        state.set_target(record("r1"));
        assert_eq!(state.mode(), TargetMode::TargetingExisting);
    }

    #[test]
    fn test_switch_table_clears_everything() {
        let mut state = GitState::new();
        state.switch_table(TableKey::Users);
        state.stage("name", json!("Alice"));
        state.set_target(record("u1"));
        state.context.pending_deletion = true;

        state.switch_table(TableKey::Projects);
        assert_eq!(state.table(), Some(TableKey::Projects));
        assert!(state.staged.is_empty());
        assert!(state.context.target.is_none());
        assert!(!state.context.modifying);
        assert!(!state.context.pending_deletion);
    }

    #[test]
    fn test_staged_edits_survive_retargeting() {
        let mut state = GitState::new();
        state.switch_table(TableKey::Links);
        state.stage("label", json!("github"));
        state.set_target(record("l1"));
        assert_eq!(state.staged.len(), 1);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut state = GitState::new();
        state.switch_table(TableKey::Work);
        state.stage("company", json!("Acme"));
        state.set_target(record("w1"));

        assert_eq!(state.reset(), 1);
        assert_eq!(state.reset(), 0);
        assert_eq!(state.table(), Some(TableKey::Work));
        assert!(state.context.target.is_none());
        assert!(!state.context.modifying);
        assert!(state.staged.is_empty());
    }

    #[test]
    fn test_set_target_cancels_pending_deletion() {
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.set_target(record("p1"));
        state.context.pending_deletion = true;

        state.set_target(record("p2"));
        assert!(!state.context.pending_deletion);
    }

    #[test]
    fn test_render_lists_staged_fields() {
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.stage("name", json!("Site"));
        let rendered = state.render();
        assert!(rendered.contains("table: projects"));
        assert!(rendered.contains("name = Site"));
    }
}
