use crate::platform::platform;
use anyhow::{bail, Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const REQUIRED_DIRECTORIES: &[&str] = &["commands", "lib", "shared"];
pub const DRIVER_BINARY: &str = "subdue-sub";

pub const BANNER: &str = r"           _         _
 ___ _   _| |__   __| |_   _  ___
/ __| | | | '_ \ / _` | | | |/ _ \
\__ \ |_| | |_) | (_| | |_| |  __/
|___/\__,_|_.__/ \__,_|\__,_|\___|
";

const CREATE_SUCCESS_THIN: &str = "
Note: This is a thin sub, before using it you need to create a driver.

A driver is any executable that runs:
  subdue-sub --driver \"$0\" --sub-path <path-to-sub> \"$@\"

You can convert this thin sub to a regular sub by running:
  subdue modify --fat {name}
";

/// Directories a sub must have; fat subs also carry `bin`.
pub fn directories(thin: bool) -> Vec<&'static str> {
    let mut dirs = Vec::new();
    if !thin {
        dirs.push("bin");
    }
    dirs.extend_from_slice(REQUIRED_DIRECTORIES);
    dirs
}

pub fn new_sub(base: &Path, name: &str, thin: bool, verbose: bool) -> Result<PathBuf> {
    check_sub_name(base, name)?;
    println!("{BANNER}");
    println!("Creating {}sub '{}'...\n", if thin { "thin " } else { "" }, name);
    let root = base.join(name);
    for d in directories(thin) {
        let sd = root.join(d);
        if verbose {
            println!("Creating directory {}", sd.display());
        }
        fs::create_dir_all(&sd)?;
    }
    let driver = if thin {
        None
    } else {
        Some(create_default_driver(&root, name, verbose)?)
    };

    println!("Congratulations! Your sub '{name}' is ready!\n");
    match driver {
        None => println!("{}", CREATE_SUCCESS_THIN.replace("{name}", name)),
        Some(driver) => {
            println!("You can set it up by running:");
            println!("  eval \"$({} init -)\"", driver.display());
        }
    }
    Ok(root)
}

/// Every problem with a proposed sub name, reported at once.
pub fn check_sub_name(base: &Path, name: &str) -> Result<()> {
    let mut errors = Vec::new();
    if name != name.trim_start() {
        errors.push("Starts with spaces");
    }
    if name != name.trim_end() {
        errors.push("Ends with spaces");
    }
    if name.starts_with('-') {
        errors.push("Starts with a hyphen");
    }
    if name.contains('/') || name.contains('\\') {
        errors.push("Has slashes");
    }
    if name.is_empty() {
        errors.push("Is empty");
    }
    if errors.is_empty() && base.join(name).exists() {
        errors.push("A file with the same name already exists");
    }
    if !errors.is_empty() {
        bail!("Invalid name for sub. Errors: \n - {}", errors.join("\n - "));
    }
    Ok(())
}

pub fn create_default_driver(root: &Path, name: &str, verbose: bool) -> Result<PathBuf> {
    let driver = root.join("bin").join(name);
    if verbose {
        println!("Creating driver {}", driver.display());
    }
    fs::write(&driver, default_driver_code(&locate_driver_binary()))?;
    if verbose {
        println!("Making the driver executable");
    }
    platform()
        .make_executable(&driver)
        .with_context(|| format!("making {} executable", driver.display()))?;
    Ok(driver)
}

pub fn default_driver_code(driver_binary: &str) -> String {
    format!(
        "#!/bin/sh\nexec '{}' --driver \"$0\" \"$@\"\n",
        driver_binary.replace('\'', r"'\''")
    )
}

/// Absolute path of the installed driver binary when it can be found, so the
/// generated script does not depend on the caller's PATH.
fn locate_driver_binary() -> String {
    if let Ok(found) = which::which(DRIVER_BINARY) {
        debug!(path = %found.display(), "driver binary on PATH");
        return found.to_string_lossy().to_string();
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(sibling) = exe.parent().map(|d| d.join(DRIVER_BINARY)) {
            if sibling.is_file() {
                return sibling.to_string_lossy().to_string();
            }
        }
    }
    DRIVER_BINARY.to_string()
}
