//! The command session: parses input lines and routes them to the
//! registry, the state machine, and the table operations.
//!
//! Every dispatch returns a [`Reply`]; errors of any kind are rendered
//! into the output string, never raised, so a bad command can never
//! terminate the session.

use thiserror::Error;

use crate::backend::{MutationError, MutationExecutor, Record};
use crate::command::{Command, GitCommand, ParseError, Parser};
use crate::ops::{ops_for, OpCtx, OpError};
use crate::schema::{alias_table, TableKey};
use crate::state::GitState;

/// Internal dispatch errors; all of them end up as reply text.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Op(#[from] OpError),

    #[error("could not load records: {0}")]
    Query(MutationError),

    #[error("no table targeted. Switch to one first, e.g. 'git projects'")]
    NoTable,

    #[error("a command is already in flight; wait for it to finish")]
    Busy,
}

/// The outcome of one dispatched line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text to display (possibly multi-line).
    Output(String),
    /// Clear the transcript; state is untouched.
    Clear,
    /// Close the interface; state is untouched.
    Exit,
}

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// The resolved current user; required for create commits.
    pub user: Option<String>,
    /// Trace dispatches to stderr.
    pub verbose: bool,
}

impl SessionConfig {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Default::default()
        }
    }

    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }
}

/// Dispatch phase: commands arriving while a mutation call is in
/// flight are rejected, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Executing,
}

/// One user's interactive session over an executor.
pub struct Session<E: MutationExecutor> {
    executor: E,
    config: SessionConfig,
    state: GitState,
    phase: Phase,
}

impl<E: MutationExecutor> Session<E> {
    pub fn new(executor: E, config: SessionConfig) -> Self {
        Self {
            executor,
            config,
            state: GitState::new(),
            phase: Phase::Idle,
        }
    }

    /// The active table, for prompt rendering.
    pub fn active_table(&self) -> Option<TableKey> {
        self.state.table()
    }

    /// Dispatch one input line.
    pub fn dispatch(&mut self, line: &str) -> Reply {
        if self.config.verbose {
            eprintln!("[cmd] {}", line);
        }

        let reply = match self.run(line) {
            Ok(reply) => reply,
            Err(e) => Reply::Output(format!("error: {}", e)),
        };

        if self.config.verbose {
            if let Reply::Output(text) = &reply {
                eprintln!("[reply] {}", text);
            }
        }
        reply
    }

    fn run(&mut self, line: &str) -> Result<Reply, SessionError> {
        if self.phase == Phase::Executing {
            return Err(SessionError::Busy);
        }

        let command = Parser::parse(line)?;

        // Any command other than an rm confirmation cancels a pending
        // deletion prompt, top-level verbs included.
        if !matches!(command, Command::Git(GitCommand::Rm(_))) {
            self.state.cancel_pending_deletion();
        }

        match command {
            Command::Help => Ok(Reply::Output(help_text())),
            Command::Clear => Ok(Reply::Clear),
            Command::Exit => Ok(Reply::Exit),
            Command::Context => Ok(Reply::Output(self.state.render())),
            Command::Git(git) => self.run_git(git).map(Reply::Output),
        }
    }

    fn run_git(&mut self, git: GitCommand) -> Result<String, SessionError> {
        if let GitCommand::Switch(table) = &git {
            let table = *table;
            self.state.switch_table(table);
            return Ok(format!(
                "switched to {}. Use 'git show' to list records",
                table
            ));
        }

        let table = self.state.table().ok_or(SessionError::NoTable)?;

        // Fresh read-only snapshot for this dispatch.
        self.phase = Phase::Executing;
        let result = self.run_verb(table, git);
        self.phase = Phase::Idle;
        result
    }

    fn run_verb(&mut self, table: TableKey, git: GitCommand) -> Result<String, SessionError> {
        let records: Vec<Record> = self
            .executor
            .query(table, self.config.user.as_deref().unwrap_or_default())
            .map_err(SessionError::Query)?;

        let ops = ops_for(table);
        let mut ctx = OpCtx {
            state: &mut self.state,
            records: &records,
            executor: &self.executor,
            user: self.config.user.as_deref(),
        };

        let reply = match &git {
            GitCommand::Switch(_) => unreachable!("handled in run_git"),
            GitCommand::Add(args) => ops.add(args, &mut ctx)?,
            GitCommand::Status => ops.status(&mut ctx)?,
            GitCommand::Commit(message) => ops.commit(message.as_deref(), &mut ctx)?,
            GitCommand::Diff => ops.diff(&mut ctx)?,
            GitCommand::Show => ops.show(&mut ctx)?,
            GitCommand::Reset => ops.reset(&mut ctx)?,
            GitCommand::Rm(answer) => ops.rm(answer.as_deref(), &mut ctx)?,
            GitCommand::Image(cmd) => ops.image(cmd, &mut ctx)?,
        };
        Ok(reply)
    }
}

/// Static usage text enumerating the table aliases and verbs.
fn help_text() -> String {
    let mut out = String::from(
        "Commands:\n\
         \x20 help                     Show this help message\n\
         \x20 clear                    Clear the transcript\n\
         \x20 exit                     Close the interface\n\
         \x20 context                  Show the current staging state\n\
         \n\
         Git commands (switch to a table first):\n\
         \x20 git <table>              Switch tables, clearing staged changes\n\
         \x20 git add <field>=<value>  Stage a field edit\n\
         \x20 git add -m <id>          Target an existing record\n\
         \x20 git status               Show staged changes\n\
         \x20 git diff                 Show staged changes as a diff\n\
         \x20 git show                 List records in the active table\n\
         \x20 git commit [message]     Apply staged changes\n\
         \x20 git reset                Discard staged changes\n\
         \x20 git rm [yes|no]          Delete the targeted record (with confirmation)\n\
         \x20 git image add <src>      Attach an image (projects only)\n\
         \x20 git image list           List attached images (projects only)\n\
         \x20 git image remove <i>     Remove an image by index (projects only)\n\
         \n\
         Tables:\n",
    );
    for (key, aliases) in alias_table() {
        out.push_str(&format!("  {:<10} aliases: {}\n", key.as_str(), aliases.join(", ")));
    }
    out
}
