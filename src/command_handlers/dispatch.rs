use crate::cli::Commands;
use crate::command_handlers::{check, modify, new};
use anyhow::{Context, Result};

pub fn dispatch(cmd: Commands, verbose: bool) -> Result<()> {
    let base = std::env::current_dir().context("reading current directory")?;
    match cmd {
        Commands::New { thin, name } => {
            new::new_sub(&base, &name, thin, verbose)?;
            Ok(())
        }
        Commands::Check { thin, name } => check::check_sub(&base, &name, thin),
        Commands::Modify { thin, fat: _, name } => modify::modify_sub(&base, &name, thin, verbose),
    }
}
