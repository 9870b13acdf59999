use argtree::{CommandId, Config, FlagArg, ListArg, Options, Parser, StringArg};

/// A small `git`-shaped grammar shared by the tests.
pub struct Git {
    pub p: Parser,
    pub verbose: FlagArg,
    pub quiet: FlagArg,
    pub remote: CommandId,
    pub add: CommandId,
    pub name: StringArg,
    pub url: StringArg,
    pub tags: ListArg,
    pub remove: CommandId,
    pub force: FlagArg,
    pub log: CommandId,
    pub format: StringArg,
}

#[allow(dead_code)]
#[derive(Debug)]
pub enum Cmd {
    Add { verbose: bool, name: Option<String>, url: Option<String>, tags: Vec<String> },
    Remove { force: bool, quiet: bool },
    Log { format: Option<String> },
}

impl Git {
    pub fn new() -> Git {
        Git::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Git {
        let mut p = Parser::with_config("git", "The stupid content tracker", config);
        let root = p.root();
        let verbose = p.flag(root, "v", "verbose", Options::new().help("Be more verbose")).unwrap();
        let quiet = p.flag(root, "q", "quiet", Options::new().help("Be quiet")).unwrap();

        let remote = p.command(root, "remote", "Manage tracked repositories").unwrap();
        let add = p.command(remote, "add", "Add a remote").unwrap();
        let name =
            p.string(add, "n", "name", Options::new().required().help("Name of the remote")).unwrap();
        let url = p.string(add, "", "url", Options::new().required()).unwrap();
        let tags = p.list(add, "t", "tag", Options::new().help("Tag to fetch")).unwrap();
        let remove = p.command(remote, "remove", "Remove a remote").unwrap();
        let force = p.flag(remove, "f", "force", Options::new()).unwrap();

        let log = p.command(root, "log", "Show commit logs").unwrap();
        let format = p.selector(log, "", "format", &["short", "full"], Options::new()).unwrap();

        Git { p, verbose, quiet, remote, add, name, url, tags, remove, force, log, format }
    }

    pub fn from_vec(args: Vec<String>) -> argtree::Result<Cmd> {
        let mut git = Git::new();
        git.p.parse(args)?;
        Ok(git.read())
    }

    pub fn read(&self) -> Cmd {
        let p = &self.p;
        if p.happened(self.add) {
            Cmd::Add {
                verbose: p.is_set(self.verbose),
                name: p.value(self.name).map(String::from),
                url: p.value(self.url).map(String::from),
                tags: p.values(self.tags).to_vec(),
            }
        } else if p.happened(self.remove) {
            Cmd::Remove { force: p.is_set(self.force), quiet: p.is_set(self.quiet) }
        } else {
            Cmd::Log { format: p.value(self.format).map(String::from) }
        }
    }
}
