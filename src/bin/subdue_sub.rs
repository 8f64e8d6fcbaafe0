//! Driver every sub execs: `exec subdue-sub --driver "$0" "$@"`.

use clap::Parser;
use std::process::ExitCode;

use subdue::cli::SubCli;
use subdue::error::EXIT_USAGE;
use subdue::{Dispatcher, ExecRunner, OsEnv, PathContext};

fn main() -> ExitCode {
    subdue::logging::init();
    // clap exits 2 on bad flags, which would read as "can't run a container".
    let cli = match SubCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { exit_code(EXIT_USAGE) } else { ExitCode::SUCCESS };
        }
    };
    let paths = match PathContext::current(cli.driver.as_deref(), cli.sub_path.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("subdue-sub: cannot locate driver: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut target = OsEnv;
    let mut runner = ExecRunner;
    let mut stdout = std::io::stdout().lock();
    let result = Dispatcher::new(&paths, &mut target, &mut runner).dispatch(&cli.request(), &mut stdout);
    match result {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("{e}");
            exit_code(e.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
