//! Session module: the dispatcher facade and interactive REPL.

mod repl;
mod session;

pub use repl::{Repl, ReplConfig};
pub use session::{Reply, Session, SessionConfig, SessionError};
