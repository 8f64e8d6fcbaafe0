use crate::platform::platform;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Prefix marking a command that must be evaluated by the calling shell.
pub const EVAL_PREFIX: &str = "sh-";

/// On-disk name of a command, with the eval prefix when `sh_flag` is set.
pub fn command_file_name(token: &str, sh_flag: bool) -> String {
    if sh_flag {
        format!("{EVAL_PREFIX}{token}")
    } else {
        token.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// No directory or executable matched, or a flag showed up before a leaf.
    NotFound,
    /// The walk ended on a directory.
    Container { path: PathBuf, arguments: Vec<OsString> },
    /// An executable file, possibly found only under its `sh-` name.
    Leaf {
        path: PathBuf,
        shell_aliased: bool,
        arguments: Vec<OsString>,
    },
}

/// Outcome of walking the command tree for a token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Tokens consumed as the command path; never includes arguments.
    pub tokens: Vec<String>,
    pub target: Target,
}

impl ResolvedCommand {
    pub fn not_found(tokens: Vec<String>) -> Self {
        ResolvedCommand { tokens, target: Target::NotFound }
    }

    pub fn found(&self) -> bool {
        !matches!(self.target, Target::NotFound)
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            Target::NotFound => None,
            Target::Container { path, .. } | Target::Leaf { path, .. } => Some(path),
        }
    }

    pub fn arguments(&self) -> Option<&[OsString]> {
        match &self.target {
            Target::NotFound => None,
            Target::Container { arguments, .. } | Target::Leaf { arguments, .. } => {
                Some(arguments)
            }
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.target, Target::Container { .. })
    }

    /// True when the leaf was found only after adding the eval prefix.
    pub fn is_shell_aliased(&self) -> bool {
        matches!(self.target, Target::Leaf { shell_aliased: true, .. })
    }

    /// True when the user typed the eval prefix on the last token.
    pub fn is_eval_request(&self) -> bool {
        self.tokens
            .last()
            .map(|t| t.starts_with(EVAL_PREFIX))
            .unwrap_or(false)
    }

    /// The consumed tokens as typed, joined by spaces.
    pub fn command(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Walk `argv` against the tree under `commands_root`, left to right, without
/// backtracking. Directories win over files, files over `sh-` aliases.
/// Command names are UTF-8; arguments after the leaf are kept as given.
pub fn resolve<S: AsRef<OsStr>>(argv: &[S], commands_root: &Path) -> ResolvedCommand {
    let mut cursor = commands_root.to_path_buf();
    let mut consumed: Vec<String> = Vec::new();

    for (idx, raw) in argv.iter().enumerate() {
        let Some(token) = raw.as_ref().to_str() else {
            consumed.push(raw.as_ref().to_string_lossy().into_owned());
            debug!(consumed = consumed.len(), "token is not valid UTF-8");
            return ResolvedCommand::not_found(consumed);
        };

        // Flags before a leaf would go to a container, which has no way to
        // take them.
        if token.starts_with('-') {
            debug!(token, consumed = consumed.len(), "flag before leaf");
            return ResolvedCommand::not_found(consumed);
        }

        consumed.push(token.to_string());
        if !is_plain_name(token) {
            debug!(token, "token is not a single path component");
            return ResolvedCommand::not_found(consumed);
        }

        let candidate = cursor.join(token);
        if candidate.is_dir() {
            debug!(path = %candidate.display(), "container step");
            cursor = candidate;
            continue;
        }

        let arguments = rest(argv, idx + 1);
        if platform().is_executable(&candidate) {
            debug!(path = %candidate.display(), "leaf");
            return ResolvedCommand {
                tokens: consumed,
                target: Target::Leaf { path: candidate, shell_aliased: false, arguments },
            };
        }

        let aliased = cursor.join(command_file_name(token, true));
        if platform().is_executable(&aliased) {
            debug!(path = %aliased.display(), "leaf under eval alias");
            return ResolvedCommand {
                tokens: consumed,
                target: Target::Leaf { path: aliased, shell_aliased: true, arguments },
            };
        }

        debug!(path = %candidate.display(), "no match");
        return ResolvedCommand::not_found(consumed);
    }

    ResolvedCommand {
        tokens: consumed,
        target: Target::Container { path: cursor, arguments: Vec::new() },
    }
}

fn rest<S: AsRef<OsStr>>(argv: &[S], from: usize) -> Vec<OsString> {
    argv.iter().skip(from).map(|s| s.as_ref().to_os_string()).collect()
}

pub(crate) fn is_plain_name(token: &str) -> bool {
    let mut components = Path::new(token).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == token
    )
}
