use crate::environment::EnvTarget;
use crate::error::DispatchError;
use crate::paths::PathContext;
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct InitArgs {
    #[arg(long)]
    shell: Option<String>,
    /// Accepted for `eval "$(mysub init -)"`; has no effect.
    #[arg(value_name = "-")]
    rest: Vec<String>,
}

// Print the shell snippet that wires the tree into an interactive shell:
// - put <root>/bin on PATH once
// - define a function named after the tree that asks the driver whether the
//   requested command is an eval command (`--is-eval`)
// - eval commands have their stdout evaluated in the calling shell, the rest
//   run as plain child processes
// User usage: eval "$(mysub init -)"
pub fn run(
    args: &[OsString],
    paths: &PathContext,
    env: &dyn EnvTarget,
    out: &mut dyn Write,
) -> Result<i32, DispatchError> {
    let parsed = InitArgs::try_parse_from(args)
        .map_err(|e| DispatchError::Usage(format!("{}: init: {}", paths.name, e.to_string().trim())))?;
    let shell = match parsed.shell.or_else(|| guess_shell(env)) {
        Some(s) => s,
        None => {
            return Err(DispatchError::Usage(
                "A shell was not specified and could not be inferred from the environment"
                    .to_string(),
            ))
        }
    };
    let template = match shell.as_str() {
        "bash" | "zsh" => POSIX_INIT,
        "fish" => FISH_INIT,
        other => {
            return Err(DispatchError::Usage(format!(
                "Shell {} is not supported. Supported shells are: {}",
                other,
                SUPPORTED_SHELLS.join(", ")
            )))
        }
    };
    let quote = if shell == "fish" { fish_quote } else { sh_quote };
    let driver = paths.driver.to_string_lossy();
    let bin_dir = paths.bin_dir.to_string_lossy();
    let script = template
        .replace("{name}", &paths.name)
        .replace("{shell}", &shell)
        .replace("{driver}", &quote(&driver))
        .replace("{bin_dir}", &quote(&bin_dir));
    writeln!(out, "{}", script.trim_start())?;
    Ok(0)
}

/// Basename of `$SHELL`, when it points at an existing file.
pub fn guess_shell(env: &dyn EnvTarget) -> Option<String> {
    let shell = env.get("SHELL")?;
    let path = Path::new(&shell);
    if !path.exists() {
        return None;
    }
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

fn sh_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn fish_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', r"\\").replace('\'', r"\'"))
}

const POSIX_INIT: &str = r#"
# {name} shell integration ({shell})
# Add by running: eval "$({name} init -)"

case ":$PATH:" in
  *:{bin_dir}:*) ;;
  *) PATH={bin_dir}:"$PATH"; export PATH ;;
esac

{name}() {
  if command {driver} --is-eval "$@"; then
    eval "$(command {driver} --shell {shell} "$@")"
  else
    command {driver} --shell {shell} "$@"
  fi
}
"#;

const FISH_INIT: &str = r#"
# {name} shell integration (fish)
# Add by running: {name} init - | source

if not contains {bin_dir} $PATH
    set -gx PATH {bin_dir} $PATH
end

function {name}
    if command {driver} --is-eval $argv
        command {driver} --shell fish $argv | source
    else
        command {driver} --shell fish $argv
    end
end
"#;
