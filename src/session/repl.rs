//! Interactive REPL over a [`Session`].

use std::io::{self, BufRead, Write};

use crate::backend::MutationExecutor;

use super::session::{Reply, Session};

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt prefix; the active table is appended.
    pub prompt: String,
    /// Print the banner on startup.
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "gitfolio".into(),
            banner: true,
        }
    }
}

/// The interactive REPL.
pub struct Repl<E: MutationExecutor> {
    session: Session<E>,
    config: ReplConfig,
    history: Vec<String>,
}

impl<E: MutationExecutor> Repl<E> {
    /// Create a new REPL over the given session.
    pub fn new(session: Session<E>) -> Self {
        Self {
            session,
            config: ReplConfig::default(),
            history: Vec::new(),
        }
    }

    /// Create a REPL with custom configuration.
    pub fn with_config(session: Session<E>, config: ReplConfig) -> Self {
        Self {
            session,
            config,
            history: Vec::new(),
        }
    }

    /// Run the REPL until `exit` or EOF.
    pub fn run(&mut self) -> io::Result<()> {
        if self.config.banner {
            self.print_banner();
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("{}", self.prompt());
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF.
                println!("\nGoodbye!");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.history.push(line.to_string());

            match self.session.dispatch(line) {
                Reply::Output(text) => println!("{}", text),
                Reply::Clear => {
                    // ANSI clear screen.
                    print!("\x1B[2J\x1B[H");
                }
                Reply::Exit => {
                    println!("Goodbye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn prompt(&self) -> String {
        match self.session.active_table() {
            Some(table) => format!("{}({})> ", self.config.prompt, table),
            None => format!("{}> ", self.config.prompt),
        }
    }

    fn print_banner(&self) {
        println!("╔═══════════════════════════════════════════════════╗");
        println!("║                  gitfolio v0.1.0                  ║");
        println!("║   git-style editing for your portfolio records    ║");
        println!("╠═══════════════════════════════════════════════════╣");
        println!("║  Type 'help' for commands, 'git <table>' to start ║");
        println!("╚═══════════════════════════════════════════════════╝");
        println!();
    }
}
