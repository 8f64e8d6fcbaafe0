use anyhow::Result;
use clap::Parser;

use subdue::cli::Cli;
use subdue::command_handlers;

fn main() -> Result<()> {
    subdue::logging::init();
    let cli = Cli::parse();
    command_handlers::dispatch::dispatch(cli.command, cli.verbose)?;
    Ok(())
}
