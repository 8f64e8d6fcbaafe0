use crate::error::DispatchError;
use crate::paths::PathContext;
use crate::platform::platform;
use crate::resolver::{is_plain_name, EVAL_PREFIX};
use fs_err as fs;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

pub fn run(args: &[OsString], paths: &PathContext, out: &mut dyn Write) -> Result<i32, DispatchError> {
    if !args.iter().all(|a| a.to_str().is_some_and(is_plain_name)) {
        return Ok(1);
    }
    let mut dir = paths.commands_dir.clone();
    dir.extend(args);
    if !dir.is_dir() {
        return Ok(1);
    }
    for name in container_commands(&dir)? {
        writeln!(out, "{name}")?;
    }
    Ok(0)
}

/// Direct children of a container as the user would type them: directories
/// by name, executables with the eval prefix removed. Sorted.
pub fn container_commands(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if path.is_dir() {
            names.push(name);
        } else if platform().is_executable(&path) {
            let typed = name.strip_prefix(EVAL_PREFIX).unwrap_or(&name).to_string();
            names.push(typed);
        }
    }
    names.sort();
    names.dedup();
    Ok(names)
}
