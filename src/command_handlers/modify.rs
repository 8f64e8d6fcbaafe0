use crate::command_handlers::check::layout_errors;
use crate::command_handlers::new::create_default_driver;
use anyhow::{bail, Result};
use fs_err as fs;
use std::path::Path;

/// Convert between a fat sub (with `bin` and a driver) and a thin one.
pub fn modify_sub(base: &Path, name: &str, to_thin: bool, verbose: bool) -> Result<()> {
    let root = base.join(name);
    let from_thin = !root.join("bin").exists();
    let errors = layout_errors(&root, name, from_thin);
    if !errors.is_empty() {
        bail!("Errors found in {}:\n - {}", name, errors.join("\n - "));
    }
    match (from_thin, to_thin) {
        (true, true) => println!("{name} is already a thin sub"),
        (false, false) => println!("{name} is already a fat sub"),
        (false, true) => {
            if verbose {
                println!("Removing {}", root.join("bin").display());
            }
            fs::remove_dir_all(root.join("bin"))?;
            println!("{name} is now a thin sub");
        }
        (true, false) => {
            fs::create_dir_all(root.join("bin"))?;
            let driver = create_default_driver(&root, name, verbose)?;
            println!("{name} is now a fat sub, driver: {}", driver.display());
        }
    }
    Ok(())
}
