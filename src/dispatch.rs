use crate::builtins::Builtin;
use crate::environment::{EnvTarget, Environment, SubVar};
use crate::error::DispatchError;
use crate::paths::PathContext;
use crate::resolver::{resolve, Target};
use crate::runner::CommandRunner;
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, info};

/// What the driver was asked to do, after its own flags were parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Only report whether the command is an eval command; run nothing.
    pub is_eval: bool,
    pub help: bool,
    /// Shell identifier forwarded to commands as `_SUB_SHELL_`.
    pub shell: Option<String>,
    /// Command tokens followed by the command's own arguments, as received.
    pub args: Vec<OsString>,
}

pub struct Dispatcher<'a> {
    paths: &'a PathContext,
    target: &'a mut dyn EnvTarget,
    runner: &'a mut dyn CommandRunner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        paths: &'a PathContext,
        target: &'a mut dyn EnvTarget,
        runner: &'a mut dyn CommandRunner,
    ) -> Self {
        Dispatcher { paths, target, runner }
    }

    /// Returns the exit status for the driver. Builtin output goes to `out`.
    pub fn dispatch(
        &mut self,
        req: &DispatchRequest,
        out: &mut dyn Write,
    ) -> Result<i32, DispatchError> {
        if req.help || req.args.is_empty() {
            debug!("showing help");
            Builtin::Help.execute(&[], self.paths, &*self.target, out)?;
            return Ok(0);
        }

        if let Some(builtin) = req.args[0].to_str().and_then(Builtin::find) {
            info!(builtin = builtin.name(), "running builtin");
            return builtin.execute(&req.args[1..], self.paths, &*self.target, out);
        }

        let resolved = resolve(&req.args, &self.paths.commands_dir);

        if req.is_eval {
            let answer = resolved.is_shell_aliased();
            debug!(command = %resolved.command(), answer, "eval query");
            return Ok(if answer { 0 } else { 1 });
        }

        let (path, shell_aliased, arguments) = match resolved.target {
            Target::NotFound => {
                return Err(DispatchError::NotFound {
                    name: self.paths.name.clone(),
                    command: resolved.command(),
                })
            }
            Target::Container { .. } => {
                return Err(DispatchError::Container {
                    name: self.paths.name.clone(),
                    command: resolved.command(),
                })
            }
            Target::Leaf { ref path, shell_aliased, ref arguments } => {
                (path.clone(), shell_aliased, arguments.clone())
            }
        };

        let mut env = Environment::new(self.paths, &mut *self.target);
        env.set(SubVar::Shell, req.shell.clone().unwrap_or_default());
        env.prepend_to_path(&self.paths.lib_dir, false);
        env.prepend_to_path(&self.paths.bin_dir, false);
        env.set(SubVar::IsEval, if shell_aliased { "1" } else { "0" });
        env.set(SubVar::Command, resolved.command());
        env.set(SubVar::PathCommand, &path);
        let snapshot = env.commit();

        info!(command = %resolved.command(), path = %path.display(), "running command");
        self.runner
            .run(&path, &arguments, &snapshot)
            .map_err(|source| DispatchError::Exec {
                name: self.paths.name.clone(),
                path,
                source,
            })
    }
}
