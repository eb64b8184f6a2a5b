//! gitfolio - a git-style command interpreter for portfolio records.
//!
//! This is the main entry point for the standalone CLI, which runs the
//! interpreter over an in-memory backend.

use std::process::ExitCode;

use gitfolio::backend::MemoryBackend;
use gitfolio::session::{Repl, Reply, Session, SessionConfig};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse simple command line args.
    let mut user = String::from("demo");
    let mut verbose = false;
    let mut execute: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-u" | "--user" => {
                i += 1;
                if i < args.len() {
                    user = args[i].clone();
                }
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-e" | "--execute" => {
                i += 1;
                if i < args.len() {
                    execute = Some(args[i].clone());
                }
            }
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--version" => {
                println!("gitfolio v0.1.0");
                return ExitCode::SUCCESS;
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let config = SessionConfig::new(user).verbose(verbose);
    let session = Session::new(MemoryBackend::new(), config);

    // Execute single command or run the REPL.
    if let Some(line) = execute {
        execute_command(session, &line)
    } else {
        run_repl(session)
    }
}

fn print_help() {
    println!("gitfolio - a git-style command interpreter for portfolio records");
    println!();
    println!("Usage: gitfolio [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -u, --user NAME     User context for created records (default: demo)");
    println!("  -e, --execute CMD   Dispatch one command and exit");
    println!("  -v, --verbose       Trace dispatches to stderr");
    println!("  -h, --help          Show this help message");
    println!("  --version           Show version");
    println!();
    println!("Examples:");
    println!("  gitfolio                       Start the interactive interpreter");
    println!("  gitfolio -u alice              Start with a named user context");
    println!("  gitfolio -e 'git projects'     Dispatch one command and exit");
}

fn execute_command(mut session: Session<MemoryBackend>, line: &str) -> ExitCode {
    match session.dispatch(line) {
        Reply::Output(text) => println!("{}", text),
        Reply::Clear | Reply::Exit => {}
    }
    ExitCode::SUCCESS
}

fn run_repl(session: Session<MemoryBackend>) -> ExitCode {
    let mut repl = Repl::new(session);
    match repl.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
