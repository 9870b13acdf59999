//! Decides what a single token means in a given command scope.
//!
//! Rules are tried in order and the first one that applies wins:
//!
//! 1. the exact name of a sub-command of the scope,
//! 2. `--long` or `-s` naming an argument visible in the scope,
//! 3. `-abc`, where every letter names a flag visible in the scope.
//!
//! Visible arguments are those of the scope itself and of every ancestor,
//! looked up innermost first.
use crate::{
    arg::{Arg, ArgId},
    command::CommandId,
    Parser,
};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Match {
    Command(CommandId),
    Arg(ArgId),
    Flags(Vec<ArgId>),
    None,
}

pub(crate) fn resolve(p: &Parser, scope: CommandId, token: &str) -> Match {
    if let Some(&child) = p.cmd(scope).children.iter().find(|&&it| p.name(it) == token) {
        return Match::Command(child);
    }

    if let Some(long) = token.strip_prefix("--") {
        return match find(p, scope, |arg| arg.long == long) {
            Some(id) => Match::Arg(id),
            None => Match::None,
        };
    }

    let Some(shorts) = token.strip_prefix('-') else { return Match::None };
    let mut chars = shorts.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Match::None,
        (Some(short), None) => match find(p, scope, |arg| arg.short == Some(short)) {
            Some(id) => Match::Arg(id),
            None => Match::None,
        },
        (Some(_), Some(_)) => {
            let mut res = Vec::new();
            for short in shorts.chars() {
                match find(p, scope, |arg| arg.short == Some(short)) {
                    Some(id) if p.arg(id).is_flag() => res.push(id),
                    _ => return Match::None,
                }
            }
            Match::Flags(res)
        }
    }
}

fn find(p: &Parser, scope: CommandId, pred: impl Fn(&Arg) -> bool) -> Option<ArgId> {
    p.ancestors(scope).find_map(|cmd| {
        let idx = p.cmd(cmd).args.iter().position(&pred)?;
        Some(ArgId { cmd, idx })
    })
}
