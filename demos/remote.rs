//! `cargo run --example remote -- remote add -n origin --url https://example.com`
//!
//! Set `RUST_LOG=argtree=trace` to watch the parser work.
use argtree::{FileOptions, Options, Parser};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut p = Parser::new("tool", "Keeps track of remote repositories.");
    let root = p.root();
    let verbose = p.flag(root, "v", "verbose", Options::new().help("Print more")).unwrap();
    let log = p
        .file(root, "", "log", FileOptions::write().append(), Options::new().help("Log to this file"))
        .unwrap();

    let remote = p.command(root, "remote", "Manage remotes").unwrap();
    let add = p.command(remote, "add", "Add a remote").unwrap();
    let name = p
        .string(add, "n", "name", Options::new().required().help("Name of the new remote"))
        .unwrap();
    let url = p
        .string(
            add,
            "u",
            "url",
            Options::new().required().help("Where it lives").validate(|values| match values {
                [it] if it.contains("://") => Ok(()),
                _ => Err("url must contain a scheme".into()),
            }),
        )
        .unwrap();
    let tags = p.list(add, "t", "tag", Options::new().help("Tag to fetch, may be repeated")).unwrap();
    let remove = p.command(remote, "remove", "Remove a remote").unwrap();
    let target = p.string(remove, "n", "name", Options::new().required()).unwrap();
    let list = p.command(remote, "list", "List remotes").unwrap();
    let format = p
        .selector(list, "f", "format", &["short", "long"], Options::new().help("Output format"))
        .unwrap();

    p.parse_env_or_exit();

    let has_log = p.take_file(log).is_some();
    if p.happened(add) {
        let name = p.value(name).unwrap_or_default();
        let url = p.value(url).unwrap_or_default();
        println!("adding {name} -> {url}");
        for tag in p.values(tags) {
            println!("  tracking tag {tag}");
        }
    } else if p.happened(remove) {
        println!("removing {}", p.value(target).unwrap_or_default());
    } else if p.happened(list) {
        println!("listing remotes ({})", p.value(format).unwrap_or("short"));
    }
    if p.is_set(verbose) {
        println!("log file: {}", if has_log { "yes" } else { "no" });
    }
}
