use crate::{command::CommandId, Error, Parser};

/// Continuation indent of the `usage:` header and the description.
const INDENT: usize = "usage: ".len();

impl Parser {
    /// Renders help for `scope`: the command chain leading to it, its
    /// sub-commands and every argument visible in it.
    ///
    /// When `err` is a missing sub-command or a help request, the scope it
    /// names is rendered instead, so the usual pattern is to pass the root
    /// together with the error returned by [`Parser::parse`].
    pub fn usage(&self, scope: CommandId, err: Option<&Error>) -> String {
        let scope = err.and_then(Error::redirect).unwrap_or(scope);
        let width = self.config.width;
        let cmd = self.cmd(scope);
        let args = self.ancestors(scope).flat_map(|it| &self.cmd(it).args).collect::<Vec<_>>();

        let mut lines = Vec::new();

        let mut header =
            self.ancestors(scope).map(|it| self.name(it).to_string()).collect::<Vec<_>>();
        header.reverse();
        if !cmd.children.is_empty() {
            header.push("<command>".to_string());
        }
        header.extend(args.iter().map(|it| it.usage()));
        fill(&mut lines, "usage:".to_string(), INDENT, width, header.iter().map(String::as_str));

        if !cmd.description.is_empty() {
            lines.push(String::new());
            fill(&mut lines, " ".repeat(INDENT), INDENT, width, cmd.description.split_whitespace());
        }

        if !cmd.children.is_empty() {
            lines.extend(["", "Commands:", ""].map(String::from));
            let pad = cmd.children.iter().map(|&it| self.name(it).len()).max().unwrap_or(0);
            for &child in &cmd.children {
                let child = self.cmd(child);
                let prefix = format!("  {:pad$}  ", child.name);
                let indent = prefix.len();
                fill(&mut lines, prefix, indent, width, child.description.split_whitespace());
            }
        }

        if !args.is_empty() {
            lines.extend(["", "Arguments:", ""].map(String::from));
            let pad = args.iter().map(|it| it.long.len() + 2).max().unwrap_or(0);
            for arg in &args {
                let short = arg.short.map(|it| format!("-{it}  ")).unwrap_or_else(|| " ".repeat(4));
                let long = format!("--{}", arg.long);
                let prefix = format!("  {short}{long:pad$}  ");
                let indent = prefix.len();
                fill(&mut lines, prefix, indent, width, arg.options.help.split_whitespace());
            }
        }

        let mut res = lines.join("\n");
        res.push('\n');
        res
    }
}

/// Appends `words` to `prefix`, starting a new line indented by `indent`
/// whenever the next word would cross `width`. A word longer than the line
/// is never split.
fn fill<'a>(
    lines: &mut Vec<String>,
    prefix: String,
    indent: usize,
    width: usize,
    words: impl IntoIterator<Item = &'a str>,
) {
    let mut line = prefix;
    let mut fresh = true;
    for word in words {
        let sep = !line.is_empty() && !line.ends_with(' ');
        if !fresh && line.len() + usize::from(sep) + word.len() > width {
            lines.push(line.trim_end().to_string());
            line = " ".repeat(indent);
        } else if sep {
            line.push(' ');
        }
        line.push_str(word);
        fresh = false;
    }
    lines.push(line.trim_end().to_string());
}
