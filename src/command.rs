use std::{fmt, fs::File};

use crate::{
    arg::{Arg, ArgId, FileArg, FileOptions, FlagArg, Kind, ListArg, Options, Slot, StringArg},
    config::Config,
    open::{Fs, Open},
    DeclareError,
};

/// Identifies a command scope within its [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct Command {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) parent: Option<CommandId>,
    pub(crate) children: Vec<CommandId>,
    pub(crate) args: Vec<Arg>,
    pub(crate) reached: bool,
}

/// A command tree together with the values parsed into it.
///
/// The root command is created with the parser; sub-commands and arguments are
/// declared on a [`CommandId`]. A command only ever gains children and
/// arguments, nothing is removed.
pub struct Parser {
    pub(crate) commands: Vec<Command>,
    pub(crate) config: Config,
    pub(crate) opener: Box<dyn Open>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("commands", &self.commands)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Parser {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Parser {
        Parser::with_config(name, description, Config::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        description: impl Into<String>,
        config: Config,
    ) -> Parser {
        let root = Command {
            name: name.into(),
            description: description.into(),
            parent: None,
            children: Vec::new(),
            args: Vec::new(),
            reached: false,
        };
        let mut res = Parser { commands: vec![root], config, opener: Box::new(Fs) };
        if config.help {
            let help = Options::new().help("Print help information");
            let help = Arg::new(Some('h'), "help".to_string(), Kind::Help, help);
            res.commands[0].args.push(help);
        }
        res
    }

    /// Replaces the capability used to open file arguments.
    pub fn with_opener(mut self, opener: impl Open + 'static) -> Parser {
        self.opener = Box::new(opener);
        self
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Declares a sub-command of `parent`.
    ///
    /// A command with sub-commands requires one of them on the command line.
    pub fn command(
        &mut self,
        parent: CommandId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<CommandId, DeclareError> {
        let name = name.into();
        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(DeclareError::InvalidCommand(name));
        }
        if self.cmd(parent).children.iter().any(|&it| self.cmd(it).name == name) {
            return Err(DeclareError::DuplicateCommand { command: self.path(parent), name });
        }

        let id = CommandId(self.commands.len());
        self.commands.push(Command {
            name,
            description: description.into(),
            parent: Some(parent),
            children: Vec::new(),
            args: Vec::new(),
            reached: false,
        });
        self.cmd_mut(parent).children.push(id);
        Ok(id)
    }

    /// A boolean switch. Short flags can be combined: `-rf`.
    pub fn flag(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        options: Options,
    ) -> Result<FlagArg, DeclareError> {
        self.add_arg(cmd, short, long, Kind::Flag, options).map(FlagArg)
    }

    /// Takes the following token as its value.
    pub fn string(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        options: Options,
    ) -> Result<StringArg, DeclareError> {
        self.add_arg(cmd, short, long, Kind::String, options).map(StringArg)
    }

    /// Like [`Parser::string`], but may be repeated; every value is kept.
    pub fn list(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        options: Options,
    ) -> Result<ListArg, DeclareError> {
        self.add_arg(cmd, short, long, Kind::List, options).map(ListArg)
    }

    /// A string argument restricted to one of `domain`.
    pub fn selector(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        domain: &[&str],
        options: Options,
    ) -> Result<StringArg, DeclareError> {
        if domain.is_empty() {
            let command = self.path(cmd);
            return Err(DeclareError::EmptyDomain { command, name: long.to_string() });
        }
        let domain = domain.iter().map(|it| it.to_string()).collect();
        self.add_arg(cmd, short, long, Kind::Selector(domain), options).map(StringArg)
    }

    /// Takes a path and opens it during parsing.
    pub fn file(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        file: FileOptions,
        options: Options,
    ) -> Result<FileArg, DeclareError> {
        self.add_arg(cmd, short, long, Kind::File(file), options).map(FileArg)
    }

    fn add_arg(
        &mut self,
        cmd: CommandId,
        short: &str,
        long: &str,
        kind: Kind,
        options: Options,
    ) -> Result<ArgId, DeclareError> {
        let mut chars = short.chars();
        let short = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c != '-' && !c.is_whitespace() => Some(c),
            _ => return Err(DeclareError::InvalidShort(short.to_string())),
        };
        if long.is_empty() || long.starts_with('-') || long.contains(char::is_whitespace) {
            return Err(DeclareError::InvalidLong(long.to_string()));
        }

        for other in self.lineage(cmd) {
            for arg in &self.cmd(other).args {
                let clash = if arg.long == long {
                    Some(format!("--{long}"))
                } else if short.is_some() && arg.short == short {
                    short.map(|it| format!("-{it}"))
                } else {
                    None
                };
                if let Some(name) = clash {
                    return Err(DeclareError::DuplicateArgument { command: self.path(cmd), name });
                }
            }
        }

        let args = &mut self.cmd_mut(cmd).args;
        args.push(Arg::new(short, long.to_string(), kind, options));
        Ok(ArgId { cmd, idx: args.len() - 1 })
    }

    /// `cmd`, its ancestors and all of its descendants: every command that
    /// shares a root-to-leaf path with it.
    fn lineage(&self, cmd: CommandId) -> Vec<CommandId> {
        let mut res = self.ancestors(cmd).collect::<Vec<_>>();
        let mut stack = self.cmd(cmd).children.clone();
        while let Some(it) = stack.pop() {
            res.push(it);
            stack.extend(self.cmd(it).children.iter().copied());
        }
        res
    }

    /// `cmd` followed by its parent, grandparent and so on up to the root.
    pub(crate) fn ancestors(&self, cmd: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(Some(cmd), move |&it| self.cmd(it).parent)
    }

    pub(crate) fn cmd(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    pub(crate) fn cmd_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    pub(crate) fn arg(&self, id: ArgId) -> &Arg {
        &self.cmd(id.cmd).args[id.idx]
    }

    pub(crate) fn arg_mut(&mut self, id: ArgId) -> &mut Arg {
        &mut self.cmd_mut(id.cmd).args[id.idx]
    }

    pub fn name(&self, cmd: CommandId) -> &str {
        &self.cmd(cmd).name
    }

    pub fn parent(&self, cmd: CommandId) -> Option<CommandId> {
        self.cmd(cmd).parent
    }

    /// Names from the root down to `cmd`, separated by spaces.
    pub fn path(&self, cmd: CommandId) -> String {
        let mut names = self.ancestors(cmd).map(|it| self.name(it)).collect::<Vec<_>>();
        names.reverse();
        names.join(" ")
    }

    /// Whether the last parse went through `cmd`. The root is always reached by
    /// a parse; a sub-command only when its name was matched.
    pub fn happened(&self, cmd: CommandId) -> bool {
        self.cmd(cmd).reached
    }

    pub fn is_set(&self, flag: FlagArg) -> bool {
        matches!(self.arg(flag.0).slot, Slot::Flag(true))
    }

    /// The last value given, `None` if the argument did not occur.
    pub fn value(&self, arg: StringArg) -> Option<&str> {
        match &self.arg(arg.0).slot {
            Slot::String(it) => it.as_deref(),
            _ => None,
        }
    }

    /// All values in the order they occurred.
    pub fn values(&self, arg: ListArg) -> &[String] {
        match &self.arg(arg.0).slot {
            Slot::List(it) => it,
            _ => &[],
        }
    }

    /// Moves the opened file out of the parser. Returns `None` if the argument
    /// did not occur or the file was already taken.
    pub fn take_file(&mut self, arg: FileArg) -> Option<File> {
        match &mut self.arg_mut(arg.0).slot {
            Slot::File(it) => it.take(),
            _ => None,
        }
    }

    /// Clears reached flags and argument values left over from a previous parse.
    pub(crate) fn reset(&mut self) {
        for cmd in &mut self.commands {
            cmd.reached = false;
            cmd.args.iter_mut().for_each(Arg::reset);
        }
    }
}
