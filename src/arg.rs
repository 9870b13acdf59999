use std::{fmt, fs::File};

use crate::{command::CommandId, BoxError};

type Validator = Box<dyn Fn(&[String]) -> Result<(), BoxError>>;

/// Per-argument settings shared by all argument kinds.
#[derive(Default)]
pub struct Options {
    pub(crate) required: bool,
    pub(crate) help: String,
    pub(crate) validate: Option<Validator>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    /// Parsing fails unless the argument is matched.
    pub fn required(mut self) -> Options {
        self.required = true;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Options {
        self.help = help.into();
        self
    }

    /// Called with the consumed values whenever the argument is matched. An
    /// error aborts parsing and is returned from `parse` as is.
    pub fn validate<F>(mut self, f: F) -> Options
    where
        F: Fn(&[String]) -> Result<(), BoxError> + 'static,
    {
        self.validate = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("required", &self.required)
            .field("help", &self.help)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// How a file argument is opened, mirroring [`std::fs::OpenOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOptions {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
    pub create_new: bool,
    /// Permission bits for newly created files (unix only).
    pub mode: Option<u32>,
}

impl FileOptions {
    /// Open an existing file for reading.
    pub fn read() -> FileOptions {
        FileOptions { read: true, ..FileOptions::default() }
    }

    /// Create or truncate a file for writing.
    pub fn write() -> FileOptions {
        FileOptions { write: true, create: true, truncate: true, ..FileOptions::default() }
    }

    pub fn append(mut self) -> FileOptions {
        self.append = true;
        self.truncate = false;
        self
    }

    pub fn create_new(mut self) -> FileOptions {
        self.create_new = true;
        self
    }

    pub fn mode(mut self, mode: u32) -> FileOptions {
        self.mode = Some(mode);
        self
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    Help,
    Flag,
    String,
    Selector(Vec<String>),
    List,
    File(FileOptions),
}

impl Kind {
    /// Number of tokens consumed after the argument's own token.
    pub(crate) fn arity(&self) -> usize {
        match self {
            Kind::Help | Kind::Flag => 0,
            Kind::String | Kind::Selector(_) | Kind::List | Kind::File(_) => 1,
        }
    }

    fn zero(&self) -> Slot {
        match self {
            Kind::Help | Kind::Flag => Slot::Flag(false),
            Kind::String | Kind::Selector(_) => Slot::String(None),
            Kind::List => Slot::List(Vec::new()),
            Kind::File(_) => Slot::File(None),
        }
    }
}

/// The value written by the parser and read by the caller.
#[derive(Debug)]
pub(crate) enum Slot {
    Flag(bool),
    String(Option<String>),
    List(Vec<String>),
    File(Option<File>),
}

/// What a single match contributes to a slot.
pub(crate) enum Matched {
    Flag,
    String(String),
    File(File),
}

impl Matched {
    fn describe(&self) -> &'static str {
        match self {
            Matched::Flag => "flag",
            Matched::String(_) => "string",
            Matched::File(_) => "file",
        }
    }
}

impl Slot {
    /// Repeatable slots append, the others keep the last occurrence.
    pub(crate) fn store(&mut self, matched: Matched) {
        match (self, matched) {
            (Slot::Flag(it), Matched::Flag) => *it = true,
            (Slot::List(it), Matched::String(value)) => it.push(value),
            (Slot::String(it), Matched::String(value)) => *it = Some(value),
            (Slot::File(it), Matched::File(file)) => *it = Some(file),
            (slot, matched) => {
                unreachable!("{slot:?} can't hold a {} value", matched.describe())
            }
        }
    }
}

/// A declared argument, owned by the command it was declared on.
#[derive(Debug)]
pub(crate) struct Arg {
    pub(crate) short: Option<char>,
    pub(crate) long: String,
    pub(crate) kind: Kind,
    pub(crate) options: Options,
    pub(crate) matched: bool,
    pub(crate) slot: Slot,
}

impl Arg {
    pub(crate) fn new(short: Option<char>, long: String, kind: Kind, options: Options) -> Arg {
        let slot = kind.zero();
        Arg { short, long, kind, options, matched: false, slot }
    }

    pub(crate) fn reset(&mut self) {
        self.matched = false;
        self.slot = self.kind.zero();
    }

    pub(crate) fn is_flag(&self) -> bool {
        self.kind.arity() == 0
    }

    /// `-s|--long` or `--long`.
    pub(crate) fn name(&self) -> String {
        match self.short {
            Some(short) => format!("-{short}|--{}", self.long),
            None => format!("--{}", self.long),
        }
    }

    /// The token describing this argument in the usage line.
    pub(crate) fn usage(&self) -> String {
        let mut res = self.name();
        match &self.kind {
            Kind::Help | Kind::Flag => (),
            Kind::String => res.push_str(" <value>"),
            Kind::Selector(domain) => {
                res.push_str(" (");
                res.push_str(&domain.join("|"));
                res.push(')');
            }
            Kind::List => res.push_str(" <value>..."),
            Kind::File(_) => res.push_str(" <file>"),
        }
        if self.options.required {
            res
        } else {
            format!("[{res}]")
        }
    }
}

/// Position of an argument in the command arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArgId {
    pub(crate) cmd: CommandId,
    pub(crate) idx: usize,
}

/// Handle to a flag, read with [`Parser::is_set`](crate::Parser::is_set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagArg(pub(crate) ArgId);

/// Handle to a string or selector argument, read with
/// [`Parser::value`](crate::Parser::value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArg(pub(crate) ArgId);

/// Handle to a repeatable argument, read with
/// [`Parser::values`](crate::Parser::values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListArg(pub(crate) ArgId);

/// Handle to a file argument, read with
/// [`Parser::take_file`](crate::Parser::take_file).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileArg(pub(crate) ArgId);
