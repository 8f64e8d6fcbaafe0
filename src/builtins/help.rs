use crate::builtins::commands::container_commands;
use crate::config::SubConfig;
use crate::error::DispatchError;
use crate::paths::PathContext;
use crate::resolver::{command_file_name, resolve, Target};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

static DOC_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*(Summary|Usage|Help):\s?(.*)$").unwrap());

/// Documentation block read from the leading comments of a command script:
///
/// ```text
/// # Usage: mysub server status [--verbose]
/// # Summary: Show server status
/// # Help: Longer text,
/// # continued on following comment lines.
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandDoc {
    pub summary: Option<String>,
    pub usage: Option<String>,
    pub help: Option<String>,
}

impl CommandDoc {
    pub fn parse(text: &str) -> Self {
        let mut doc = CommandDoc::default();
        let mut current: Option<&'static str> = None;
        for line in text.lines() {
            if let Some(caps) = DOC_LINE.captures(line) {
                let key = match &caps[1] {
                    "Summary" => "summary",
                    "Usage" => "usage",
                    _ => "help",
                };
                *doc.slot(key) = Some(caps[2].trim_end().to_string());
                current = Some(key);
            } else if let Some(rest) = line.strip_prefix('#') {
                if line.starts_with("#!") {
                    continue;
                }
                // Summaries are one line; usage and help may continue.
                match current {
                    Some(key) if key != "summary" => {
                        let slot = doc.slot(key);
                        let text = rest.strip_prefix(' ').unwrap_or(rest).trim_end();
                        if let Some(existing) = slot.as_mut() {
                            existing.push('\n');
                            existing.push_str(text);
                        }
                    }
                    _ => current = None,
                }
            } else {
                current = None;
                if !line.trim().is_empty() {
                    break;
                }
            }
        }
        doc
    }

    pub fn read(path: &Path) -> Self {
        match fs_err::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(_) => Self::default(),
        }
    }

    fn slot(&mut self, key: &str) -> &mut Option<String> {
        match key {
            "summary" => &mut self.summary,
            "usage" => &mut self.usage,
            _ => &mut self.help,
        }
    }
}

pub fn run(args: &[OsString], paths: &PathContext, out: &mut dyn Write) -> Result<i32, DispatchError> {
    if args.is_empty() {
        return overview(paths, out);
    }
    let resolved = resolve(args, &paths.commands_dir);
    match &resolved.target {
        Target::NotFound => Err(DispatchError::NotFound {
            name: paths.name.clone(),
            command: resolved.command(),
        }),
        Target::Container { path, .. } => {
            writeln!(out, "Usage: {} {} <command> [<args>]", paths.name, resolved.command())?;
            writeln!(out)?;
            list_with_summaries(path, out)?;
            Ok(0)
        }
        Target::Leaf { path, .. } => {
            let doc = CommandDoc::read(path);
            match (&doc.usage, &doc.help, &doc.summary) {
                (None, None, None) => {
                    writeln!(out, "Sorry, this command isn't documented yet.")?;
                }
                (usage, help, summary) => {
                    if let Some(usage) = usage {
                        writeln!(out, "Usage: {usage}")?;
                    }
                    if let Some(text) = help.as_ref().or(summary.as_ref()) {
                        if usage.is_some() {
                            writeln!(out)?;
                        }
                        writeln!(out, "{text}")?;
                    }
                }
            }
            Ok(0)
        }
    }
}

fn overview(paths: &PathContext, out: &mut dyn Write) -> Result<i32, DispatchError> {
    let cfg = SubConfig::load(&paths.root);
    writeln!(out, "Usage: {} <command> [<args>]", paths.name)?;
    if let Some(summary) = &cfg.summary {
        writeln!(out)?;
        writeln!(out, "{summary}")?;
    }
    if paths.commands_dir.is_dir() {
        writeln!(out)?;
        writeln!(out, "Some useful {} commands are:", paths.name)?;
        list_with_summaries(&paths.commands_dir, out)?;
    }
    if let Some(help) = &cfg.help {
        writeln!(out)?;
        writeln!(out, "{help}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "See '{} help <command>' for information on a specific command.",
        paths.name
    )?;
    Ok(0)
}

fn list_with_summaries(dir: &Path, out: &mut dyn Write) -> Result<(), DispatchError> {
    let names = container_commands(dir)?;
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for name in names {
        let summary = summary_for(dir, &name).unwrap_or_default();
        let line = format!("   {name:<width$}   {summary}");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn summary_for(dir: &Path, name: &str) -> Option<String> {
    let plain = dir.join(name);
    let file = if plain.is_file() {
        plain
    } else {
        dir.join(command_file_name(name, true))
    };
    CommandDoc::read(&file).summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_doc_block() {
        let doc = CommandDoc::parse(
            "#!/bin/sh\n# Usage: ex server status [-v]\n# Summary: Show status\n# Help: Prints the state\n# of every server.\nset -e\n# Summary: ignored\n",
        );
        assert_eq!(doc.usage.as_deref(), Some("ex server status [-v]"));
        assert_eq!(doc.summary.as_deref(), Some("Show status"));
        assert_eq!(doc.help.as_deref(), Some("Prints the state\nof every server."));
    }

    #[test]
    fn undocumented_script_has_no_doc() {
        assert_eq!(CommandDoc::parse("#!/bin/sh\necho hi\n"), CommandDoc::default());
    }

    #[cfg(unix)]
    #[test]
    fn overview_lists_commands_with_summaries() {
        use crate::testutil::TempTree;
        let t = TempTree::new("help_overview");
        t.command_with("status", "# Summary: Show status\necho ok");
        t.command_with("sh-go", "# Summary: Jump somewhere");
        t.dir("group");
        let paths = PathContext::from_driver(&t.root().join("bin/ex"), None);
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(run(&[], &paths, &mut out).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Usage: ex <command> [<args>]\n"));
        assert!(text.contains("   go       Jump somewhere\n"), "{text}");
        assert!(text.contains("   group\n"), "{text}");
        assert!(text.contains("   status   Show status\n"), "{text}");
        assert!(text.contains("See 'ex help <command>'"));
    }

    #[cfg(unix)]
    #[test]
    fn help_for_missing_command_is_not_found() {
        use crate::testutil::TempTree;
        let t = TempTree::new("help_missing");
        let paths = PathContext::from_driver(&t.root().join("bin/ex"), None);
        let err = run(&[OsString::from("nope")], &paths, &mut std::io::sink()).unwrap_err();
        assert_eq!(err.to_string(), "ex: no such command 'nope'");
    }
}
