//! Command line parser for nested sub-command grammars.
//!
//! A grammar is declared at runtime as a tree of commands, each carrying its
//! own arguments. Declaring an argument hands back a small handle; after
//! [`Parser::parse`] the handle is used to read what was matched.
//!
//! ```
//! let mut p = argtree::Parser::new("tool", "Does things");
//! let root = p.root();
//! let verbose = p.flag(root, "v", "verbose", argtree::Options::new()).unwrap();
//! let remote = p.command(root, "remote", "Manage remotes").unwrap();
//! let add = p.command(remote, "add", "Add a remote").unwrap();
//! let name = p.string(add, "n", "name", argtree::Options::new().required()).unwrap();
//!
//! p.parse(["remote", "add", "-n", "origin", "-v"]).unwrap();
//! assert!(p.happened(add));
//! assert!(p.is_set(verbose));
//! assert_eq!(p.value(name), Some("origin"));
//! ```
//!
//! Arguments declared on a command are visible to all of its sub-commands, so
//! `-v` above is accepted after `add`. Names must be unique along every
//! root-to-leaf path; this is checked when the argument is declared.
//!
//! Parsing mutates the tree (reached flags and argument values), so a parser
//! handles one token list at a time. Each call to `parse` starts from a clean
//! slate.
use std::{ffi::OsString, fmt, io, path::PathBuf};

mod arg;
mod command;
mod config;
mod matcher;
mod open;
mod parse;
mod usage;

pub use crate::{
    arg::{FileArg, FileOptions, FlagArg, ListArg, Options, StringArg},
    command::{CommandId, Parser},
    config::Config,
    open::{Fs, Open},
};

/// Error type accepted from validators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A parse failure. Parsing stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`{command}`: flag is required: `--{name}`")]
    MissingArgument { scope: CommandId, command: String, name: String },
    #[error("`{command}`: expected a value for `--{name}`")]
    MissingValue { scope: CommandId, command: String, name: String },
    #[error("`{command}`: a subcommand is required")]
    MissingSubCommand { scope: CommandId, command: String },
    #[error("`{command}`: invalid value for `--{name}`: `{value}`, expected one of {}", .domain.join(", "))]
    InvalidSelectorValue {
        scope: CommandId,
        command: String,
        name: String,
        value: String,
        domain: Vec<String>,
    },
    #[error(transparent)]
    Validation(BoxError),
    #[error("can't open `{}`", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("too many arguments: {}", Leftover(.leftover))]
    TooManyArguments { leftover: Vec<String> },
    #[error("invalid utf8: {0:?}")]
    InvalidUtf8(OsString),
    #[error("`{command}`: help requested")]
    Help { scope: CommandId, command: String },
}

impl Error {
    /// Whether this is a request for help rather than a failure.
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help { .. })
    }

    /// The command scope the error belongs to, if any.
    pub fn scope(&self) -> Option<CommandId> {
        match self {
            Error::MissingArgument { scope, .. }
            | Error::MissingValue { scope, .. }
            | Error::MissingSubCommand { scope, .. }
            | Error::InvalidSelectorValue { scope, .. }
            | Error::Help { scope, .. } => Some(*scope),
            Error::Validation(_)
            | Error::FileOpen { .. }
            | Error::TooManyArguments { .. }
            | Error::InvalidUtf8(_) => None,
        }
    }

    /// Scope the usage text should be rendered for instead of the caller's.
    pub(crate) fn redirect(&self) -> Option<CommandId> {
        match self {
            Error::MissingSubCommand { scope, .. } | Error::Help { scope, .. } => Some(*scope),
            _ => None,
        }
    }
}

struct Leftover<'a>(&'a [String]);

impl fmt::Display for Leftover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for arg in self.0 {
            write!(f, "{sep}`{arg}`")?;
            sep = " ";
        }
        Ok(())
    }
}

/// A grammar that can't be built. These are programming errors in the caller's
/// declarations, never caused by user input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclareError {
    #[error("short name must be empty or a single character: `{0}`")]
    InvalidShort(String),
    #[error("invalid long name: `{0}`")]
    InvalidLong(String),
    #[error("invalid command name: `{0}`")]
    InvalidCommand(String),
    #[error("`{command}`: argument name already in use: `{name}`")]
    DuplicateArgument { command: String, name: String },
    #[error("`{command}`: subcommand already declared: `{name}`")]
    DuplicateCommand { command: String, name: String },
    #[error("`{command}`: selector `--{name}` has no values")]
    EmptyDomain { command: String, name: String },
}
