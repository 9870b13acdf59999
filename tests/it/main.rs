mod git;

use std::fmt;

use argtree::{Error, Options, Parser};
use expect_test::{expect, Expect};

use crate::git::Git;

fn check<F, A>(f: F, args: &str, expect: Expect)
where
    F: FnOnce(Vec<String>) -> argtree::Result<A>,
    A: fmt::Debug,
{
    let args = args.split_ascii_whitespace().map(String::from).collect::<Vec<_>>();
    let res = f(args);
    match res {
        Ok(args) => {
            expect.assert_debug_eq(&args);
        }
        Err(err) => {
            expect.assert_eq(&err.to_string());
        }
    }
}

#[test]
fn smoke() {
    check(
        Git::from_vec,
        "remote add -n origin --url https://example.com",
        expect![[r#"
            Add {
                verbose: false,
                name: Some(
                    "origin",
                ),
                url: Some(
                    "https://example.com",
                ),
                tags: [],
            }
        "#]],
    );
    check(
        Git::from_vec,
        "-v remote add --url u -t a --name origin -t b",
        expect![[r#"
            Add {
                verbose: true,
                name: Some(
                    "origin",
                ),
                url: Some(
                    "u",
                ),
                tags: [
                    "a",
                    "b",
                ],
            }
        "#]],
    );
    check(
        Git::from_vec,
        "remote add -n origin --url u --name upstream",
        expect![[r#"
            Add {
                verbose: false,
                name: Some(
                    "upstream",
                ),
                url: Some(
                    "u",
                ),
                tags: [],
            }
        "#]],
    );
}

#[test]
fn ancestor_arguments() {
    check(
        Git::from_vec,
        "remote remove -fq",
        expect![[r#"
            Remove {
                force: true,
                quiet: true,
            }
        "#]],
    );
    check(
        Git::from_vec,
        "remote add -n o --url u --verbose",
        expect![[r#"
            Add {
                verbose: true,
                name: Some(
                    "o",
                ),
                url: Some(
                    "u",
                ),
                tags: [],
            }
        "#]],
    );
    check(Git::from_vec, "remote add -n o --url u -fv", expect!["too many arguments: `-fv`"]);
    check(Git::from_vec, "-f remote remove", expect!["too many arguments: `-f`"]);
}

#[test]
fn subcommands() {
    check(Git::from_vec, "", expect!["`git`: a subcommand is required"]);
    check(Git::from_vec, "-v", expect!["`git`: a subcommand is required"]);
    check(Git::from_vec, "remote", expect!["`git remote`: a subcommand is required"]);
    check(Git::from_vec, "remote Add", expect!["`git remote`: a subcommand is required"]);
    check(Git::from_vec, "log remote", expect!["too many arguments: `remote`"]);
    check(
        Git::from_vec,
        "log",
        expect![[r#"
            Log {
                format: None,
            }
        "#]],
    );
}

#[test]
fn required_arguments() {
    check(Git::from_vec, "remote add --url u", expect!["`git remote add`: flag is required: `--name`"]);
    check(
        Git::from_vec,
        "remote add -t x -v --name o",
        expect!["`git remote add`: flag is required: `--url`"],
    );
    check(Git::from_vec, "remote add --url u -n", expect!["`git remote add`: expected a value for `--name`"]);
}

#[test]
fn selector() {
    check(
        Git::from_vec,
        "log --format mid",
        expect!["`git log`: invalid value for `--format`: `mid`, expected one of short, full"],
    );
    check(
        Git::from_vec,
        "log --format full",
        expect![[r#"
            Log {
                format: Some(
                    "full",
                ),
            }
        "#]],
    );
}

#[test]
fn happened() {
    let mut git = Git::new();
    let root = git.p.root();
    assert!(!git.p.happened(root));

    git.p.parse(["remote", "remove", "-f"]).unwrap();
    assert!(git.p.happened(root));
    assert!(git.p.happened(git.remote));
    assert!(git.p.happened(git.remove));
    assert!(!git.p.happened(git.add));
    assert!(!git.p.happened(git.log));
    assert!(git.p.is_set(git.force));
    assert_eq!(git.p.value(git.name), None);
    assert_eq!(git.p.values(git.tags), &[] as &[String]);
    assert_eq!(git.p.value(git.format), None);
}

#[test]
fn reparse_starts_clean() {
    let mut git = Git::new();
    git.p.parse(["remote", "add", "-n", "o", "--url", "u", "-t", "x"]).unwrap();
    assert_eq!(git.p.values(git.tags), ["x"]);

    git.p.parse(["log", "-q"]).unwrap();
    assert!(!git.p.happened(git.add));
    assert!(!git.p.happened(git.remote));
    assert!(git.p.happened(git.log));
    assert!(git.p.is_set(git.quiet));
    assert_eq!(git.p.value(git.name), None);
    assert!(git.p.values(git.tags).is_empty());
}

#[test]
fn failed_parse_keeps_earlier_values() {
    let mut git = Git::new();
    let err = git.p.parse(["-v", "remote", "add", "-t", "x", "--url", "u"]).unwrap_err();
    assert!(matches!(err, Error::MissingArgument { scope, .. } if scope == git.add));
    assert!(git.p.is_set(git.verbose));
    assert_eq!(git.p.values(git.tags), ["x"]);
    assert_eq!(git.p.value(git.url), Some("u"));
    assert!(git.p.happened(git.add));
}

#[test]
fn missing_subcommand_names_its_scope() {
    let mut git = Git::new();
    let err = git.p.parse(["remote", "-v"]).unwrap_err();
    assert!(matches!(err, Error::MissingSubCommand { .. }));
    assert_eq!(err.scope(), Some(git.remote));
    assert!(!err.is_help());
}

#[test]
fn flat_grammar() {
    let mut p = Parser::new("rm", "Remove files");
    let root = p.root();
    let recursive = p.flag(root, "r", "recursive", Options::new()).unwrap();
    let force = p.flag(root, "f", "force", Options::new()).unwrap();

    p.parse(["-rf"]).unwrap();
    assert!(p.is_set(recursive));
    assert!(p.is_set(force));

    p.parse(["--force", "-f"]).unwrap();
    assert!(!p.is_set(recursive));
    assert!(p.is_set(force));

    p.parse(Vec::<String>::new()).unwrap();
    assert!(p.happened(root));
    assert!(!p.is_set(force));

    let err = p.parse(["extra"]).unwrap_err();
    assert_eq!(err.to_string(), "too many arguments: `extra`");
    assert!(matches!(err, Error::TooManyArguments { ref leftover } if leftover == &["extra"]));

    let err = p.parse(["-r", "a", "-x", "b"]).unwrap_err();
    assert_eq!(err.to_string(), "too many arguments: `a` `-x` `b`");
}

#[test]
fn blank_tokens_are_not_leftovers() {
    let mut p = Parser::new("tool", "");
    let root = p.root();
    let name = p.string(root, "n", "name", Options::new()).unwrap();

    p.parse(["", "--name", "x", ""]).unwrap();
    assert_eq!(p.value(name), Some("x"));

    p.parse(["--name", ""]).unwrap();
    assert_eq!(p.value(name), Some(""));

    let err = p.parse(["", "extra"]).unwrap_err();
    assert_eq!(err.to_string(), "too many arguments: `extra`");
}

#[test]
fn values_may_look_like_flags() {
    let mut p = Parser::new("calc", "");
    let root = p.root();
    let offset = p.string(root, "o", "offset", Options::new()).unwrap();
    let verbose = p.flag(root, "v", "verbose", Options::new()).unwrap();

    p.parse(["-o", "-v"]).unwrap();
    assert_eq!(p.value(offset), Some("-v"));
    assert!(!p.is_set(verbose));
}
