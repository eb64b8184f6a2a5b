//! Command-line parser.
//!
//! Line-oriented and space-tokenized, with case-insensitive verb
//! matching. The tails of `git add` and `git commit` are kept as raw
//! remainders so quoted values containing spaces survive intact.

use crate::schema::lookup_alias;
use crate::validate::strip_quotes;

use super::ast::{AddArgs, Command, GitCommand, ImageCommand};
use super::error::{ParseError, ParseResult};

/// The command parser.
pub struct Parser;

impl Parser {
    /// Parse one input line into a [`Command`].
    pub fn parse(line: &str) -> ParseResult<Command> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (verb, rest) = split_token(line);
        match verb.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "exit" | "quit" => Ok(Command::Exit),
            "context" => Ok(Command::Context),
            "git" => Self::parse_git(rest),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_git(rest: &str) -> ParseResult<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                verb: "git",
                usage: "git <table> or git <verb> [args]",
            });
        }

        let (token, tail) = split_token(rest);

        // A table alias wins over verbs; alias matching is
        // case-insensitive like everything else.
        if let Some(table) = lookup_alias(token) {
            return Ok(Command::Git(GitCommand::Switch(table)));
        }

        let git = match token.to_lowercase().as_str() {
            "add" => GitCommand::Add(Self::parse_add(tail)?),
            "status" => GitCommand::Status,
            "commit" => {
                let message = if tail.is_empty() {
                    None
                } else {
                    Some(strip_quotes(tail).to_string())
                };
                GitCommand::Commit(message)
            }
            "diff" => GitCommand::Diff,
            "show" => GitCommand::Show,
            "reset" => GitCommand::Reset,
            "rm" => {
                let answer = (!tail.is_empty()).then(|| split_token(tail).0.to_string());
                GitCommand::Rm(answer)
            }
            "image" => GitCommand::Image(Self::parse_image(tail)?),
            other => return Err(ParseError::UnknownGitToken(other.to_string())),
        };
        Ok(Command::Git(git))
    }

    fn parse_add(tail: &str) -> ParseResult<AddArgs> {
        if tail.is_empty() {
            return Err(ParseError::MissingArgument {
                verb: "add",
                usage: "git add <field>=<value> or git add -m <record-id>",
            });
        }

        if let Some(after_flag) = tail.strip_prefix("-m") {
            let (id, _) = split_token(after_flag.trim_start());
            if id.is_empty() {
                return Err(ParseError::MissingArgument {
                    verb: "add -m",
                    usage: "git add -m <record-id>",
                });
            }
            return Ok(AddArgs::Target(id.to_string()));
        }

        // First '=' splits field from value; the value may contain more.
        match tail.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => Ok(AddArgs::Assign {
                field: field.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err(ParseError::MalformedAssignment(tail.to_string())),
        }
    }

    fn parse_image(tail: &str) -> ParseResult<ImageCommand> {
        if tail.is_empty() {
            return Err(ParseError::MissingArgument {
                verb: "image",
                usage: "git image <add|list|remove> [args]",
            });
        }

        let (sub, rest) = split_token(tail);
        match sub.to_lowercase().as_str() {
            "add" => {
                if rest.is_empty() {
                    Err(ParseError::MissingArgument {
                        verb: "image add",
                        usage: "git image add <path-or-url>",
                    })
                } else {
                    Ok(ImageCommand::Add(strip_quotes(rest).to_string()))
                }
            }
            "list" => Ok(ImageCommand::List),
            "remove" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        verb: "image remove",
                        usage: "git image remove <index>",
                    });
                }
                let (index, _) = split_token(rest);
                index
                    .parse::<usize>()
                    .map(ImageCommand::Remove)
                    .map_err(|_| ParseError::InvalidImageIndex(index.to_string()))
            }
            other => Err(ParseError::UnknownImageVerb(other.to_string())),
        }
    }
}

/// Split off the first whitespace-delimited token, trimming the rest.
fn split_token(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (input, ""),
    }
}
