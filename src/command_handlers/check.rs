use crate::command_handlers::new::directories;
use anyhow::{bail, Result};
use std::path::Path;

pub fn check_sub(base: &Path, name: &str, thin: bool) -> Result<()> {
    let errors = layout_errors(&base.join(name), name, thin);
    if !errors.is_empty() {
        bail!("Errors found in {}:\n - {}", name, errors.join("\n - "));
    }
    println!("{name}: ok");
    Ok(())
}

pub fn layout_errors(root: &Path, name: &str, thin: bool) -> Vec<String> {
    let mut errors = Vec::new();
    if !root.is_dir() {
        errors.push(format!("Not a directory: {name}"));
    }
    for d in directories(thin) {
        if !root.join(d).is_dir() {
            errors.push(format!("Required directory {d} is missing"));
        }
    }
    if thin && root.join("bin").is_dir() {
        errors.push("Thin sub should not have a 'bin' directory".to_string());
    }
    errors
}
