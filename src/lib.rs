//! gitfolio - a git-style command interpreter for portfolio records.
//!
//! A terminal-like command language (`git add`, `git status`,
//! `git commit`, ...) for mutating structured portfolio records:
//! profile fields, links, projects, education and work history. Edits
//! are staged locally and only sent to the backing store on commit;
//! deletions require an explicit confirmation step.
//!
//! # Example
//!
//! ```
//! use gitfolio::backend::MemoryBackend;
//! use gitfolio::session::{Reply, Session, SessionConfig};
//!
//! let mut session = Session::new(MemoryBackend::new(), SessionConfig::new("alice"));
//! session.dispatch("git projects");
//! session.dispatch("git add name=\"Portfolio Site\"");
//! session.dispatch("git add description=\"A site\"");
//! match session.dispatch("git commit \"first commit\"") {
//!     Reply::Output(text) => assert!(text.contains("Created new project")),
//!     _ => unreachable!(),
//! }
//! ```

pub mod backend;
pub mod command;
pub mod ops;
pub mod schema;
pub mod session;
pub mod state;
pub mod validate;
