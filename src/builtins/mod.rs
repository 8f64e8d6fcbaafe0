pub mod commands;
pub mod help;
pub mod init;

use crate::environment::EnvTarget;
use crate::error::DispatchError;
use crate::paths::PathContext;
use std::ffi::OsString;
use std::io::Write;

/// Commands answered by the driver itself instead of the command tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Commands,
    Init,
}

impl Builtin {
    pub const ALL: [Builtin; 3] = [Builtin::Help, Builtin::Commands, Builtin::Init];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::Commands => "commands",
            Builtin::Init => "init",
        }
    }

    pub fn find(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// `args` excludes the builtin's own name.
    pub fn execute(
        self,
        args: &[OsString],
        paths: &PathContext,
        env: &dyn EnvTarget,
        out: &mut dyn Write,
    ) -> Result<i32, DispatchError> {
        match self {
            Builtin::Help => help::run(args, paths, out),
            Builtin::Commands => commands::run(args, paths, out),
            Builtin::Init => init::run(args, paths, env, out),
        }
    }
}
