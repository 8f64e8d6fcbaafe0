use crate::environment::EnvSnapshot;
use crate::platform::platform;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Starts a resolved command. The child sees exactly the committed snapshot.
pub trait CommandRunner {
    fn run(&mut self, program: &Path, args: &[OsString], env: &EnvSnapshot) -> std::io::Result<i32>;
}

/// Replaces the driver process with the command. Returns only on failure.
#[derive(Debug, Default)]
pub struct ExecRunner;

impl CommandRunner for ExecRunner {
    fn run(&mut self, program: &Path, args: &[OsString], env: &EnvSnapshot) -> std::io::Result<i32> {
        Err(platform().replace_process(build_command(program, args, env)))
    }
}

/// Runs the command as a child and waits for it.
#[derive(Debug, Default)]
pub struct SpawnRunner;

impl CommandRunner for SpawnRunner {
    fn run(&mut self, program: &Path, args: &[OsString], env: &EnvSnapshot) -> std::io::Result<i32> {
        let status = build_command(program, args, env).status()?;
        Ok(platform().status_code(status))
    }
}

fn build_command(program: &Path, args: &[OsString], env: &EnvSnapshot) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).env_clear().envs(env.iter());
    cmd
}
