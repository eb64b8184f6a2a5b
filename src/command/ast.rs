//! Parsed command representation.

use crate::schema::TableKey;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Static usage text.
    Help,
    /// Clear the transcript (not state).
    Clear,
    /// Close the interface (not state).
    Exit,
    /// Render the current staging state for debugging.
    Context,
    /// A `git ...` command routed to the active table.
    Git(GitCommand),
}

/// The git-style verbs.
#[derive(Debug, Clone, PartialEq)]
pub enum GitCommand {
    /// `git <table-alias>`: reset targeting into this table.
    Switch(TableKey),
    Add(AddArgs),
    Status,
    /// Optional trailing free-text commit message.
    Commit(Option<String>),
    Diff,
    Show,
    Reset,
    /// Optional confirmation token (`yes`/`y`/`no`/`n`).
    Rm(Option<String>),
    /// Project-only image sub-verbs.
    Image(ImageCommand),
}

/// The two sub-forms of `git add`.
#[derive(Debug, Clone, PartialEq)]
pub enum AddArgs {
    /// `git add -m <record-id>`: target an existing record.
    Target(String),
    /// `git add <field>=<value>`: stage a field edit.
    Assign { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageCommand {
    /// `git image add <path-or-url>`.
    Add(String),
    /// `git image list`.
    List,
    /// `git image remove <index>`.
    Remove(usize),
}
