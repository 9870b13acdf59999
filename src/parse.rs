use std::path::PathBuf;

use tracing::{debug, trace};

use crate::{
    arg::{ArgId, Kind, Matched},
    command::CommandId,
    matcher::{self, Match},
    Error, Parser, Result,
};

/// Remaining tokens. Consumed ones are taken out, leaving `None` behind.
type Buf = [Option<String>];

impl Parser {
    /// Parses `args`, not including the program name.
    ///
    /// On success every argument handle reads what was matched and
    /// [`Parser::happened`] tells which commands were selected. On failure the
    /// values matched before the error are kept.
    pub fn parse<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buf = args.into_iter().map(|it| Some(it.into())).collect::<Vec<_>>();
        self.reset();

        let root = self.root();
        if let Err(err) = self.parse_scope(root, &mut buf) {
            debug!(%err, "parse failed");
            return Err(err);
        }

        let leftover =
            buf.into_iter().flatten().filter(|it| !it.is_empty()).collect::<Vec<_>>();
        if !leftover.is_empty() {
            return Err(Error::TooManyArguments { leftover });
        }
        debug!("parse finished");
        Ok(())
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&mut self) -> Result<()> {
        let args = std::env::args_os()
            .skip(1)
            .map(|it| it.into_string().map_err(Error::InvalidUtf8))
            .collect::<Result<Vec<_>>>()?;
        self.parse(args)
    }

    /// Parses the arguments of the current process, exiting on failure.
    ///
    /// Help goes to stdout with exit code 0; errors are printed with the usage
    /// of the scope they occurred in to stderr, exiting with 2.
    pub fn parse_env_or_exit(&mut self) {
        let err = match self.parse_env() {
            Ok(()) => return,
            Err(err) => err,
        };
        let usage = self.usage(self.root(), Some(&err));
        if err.is_help() {
            print!("{usage}");
            std::process::exit(0)
        }
        eprintln!("{err}\n");
        eprint!("{usage}");
        std::process::exit(2)
    }

    fn parse_scope(&mut self, scope: CommandId, buf: &mut Buf) -> Result<()> {
        debug!(command = %self.path(scope), "entering scope");
        self.cmd_mut(scope).reached = true;

        let mut descended = false;
        let mut pos = 0;
        while pos < buf.len() {
            let Some(token) = &buf[pos] else {
                pos += 1;
                continue;
            };
            match matcher::resolve(self, scope, token) {
                Match::Command(child) => {
                    buf[pos] = None;
                    self.parse_scope(child, &mut buf[pos + 1..])?;
                    descended = true;
                    break;
                }
                Match::Arg(id) => {
                    buf[pos] = None;
                    let value = match self.arg(id).kind.arity() {
                        0 => None,
                        _ => match buf.get_mut(pos + 1).and_then(Option::take) {
                            Some(value) => Some(value),
                            None => return Err(self.missing_value(scope, id)),
                        },
                    };
                    pos += 1 + usize::from(value.is_some());
                    self.accept(scope, id, value)?;
                }
                Match::Flags(ids) => {
                    buf[pos] = None;
                    pos += 1;
                    for id in ids {
                        self.accept(scope, id, None)?;
                    }
                }
                Match::None => {
                    trace!(token = %token, "unmatched");
                    pos += 1;
                }
            }
        }

        let cmd = self.cmd(scope);
        if let Some(arg) = cmd.args.iter().find(|it| it.options.required && !it.matched) {
            return Err(Error::MissingArgument {
                scope,
                command: self.path(scope),
                name: arg.long.clone(),
            });
        }
        if !cmd.children.is_empty() && !descended {
            return Err(Error::MissingSubCommand { scope, command: self.path(scope) });
        }
        Ok(())
    }

    /// Runs the hooks of a matched argument and stores its value.
    fn accept(&mut self, scope: CommandId, id: ArgId, value: Option<String>) -> Result<()> {
        let arg = self.arg(id);
        trace!(arg = %arg.long, ?value, "matched");

        if let Some(validate) = &arg.options.validate {
            validate(value.as_slice()).map_err(Error::Validation)?;
        }

        let matched = match (&arg.kind, value) {
            (Kind::Help, _) => return Err(Error::Help { scope, command: self.path(scope) }),
            (Kind::Selector(domain), Some(value)) if !domain.contains(&value) => {
                return Err(Error::InvalidSelectorValue {
                    scope,
                    command: self.path(scope),
                    name: arg.long.clone(),
                    value,
                    domain: domain.clone(),
                })
            }
            (Kind::File(options), Some(path)) => {
                let path = PathBuf::from(path);
                match self.opener.open(&path, options) {
                    Ok(file) => Matched::File(file),
                    Err(source) => return Err(Error::FileOpen { path, source }),
                }
            }
            (Kind::Flag, _) => Matched::Flag,
            (_, Some(value)) => Matched::String(value),
            (_, None) => return Err(self.missing_value(scope, id)),
        };

        let arg = self.arg_mut(id);
        arg.matched = true;
        arg.slot.store(matched);
        Ok(())
    }

    fn missing_value(&self, scope: CommandId, id: ArgId) -> Error {
        Error::MissingValue { scope, command: self.path(scope), name: self.arg(id).long.clone() }
    }
}

