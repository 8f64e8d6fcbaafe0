use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::dispatch::DispatchRequest;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "subdue",
    about = "Subdue: organize shell commands as a tree of subcommands behind a single driver"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Give extra information about steps
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new sub.
    /// Examples:
    ///   subdue new mysub          # bin/, commands/, lib/, shared/ and a driver
    ///   subdue new --thin mysub   # no bin/ and no driver
    New {
        /// Create a thin sub, without a driver
        #[arg(short, long)]
        thin: bool,
        /// Name of the sub to create
        #[arg(value_name = "SUB_NAME")]
        name: String,
    },
    /// Check the directory layout of an existing sub
    Check {
        /// Consider the sub as thin
        #[arg(short, long)]
        thin: bool,
        #[arg(value_name = "SUB_NAME")]
        name: String,
    },
    /// Convert a sub between thin and fat
    Modify {
        /// Turn this fat sub into a thin sub
        #[arg(short, long, conflicts_with = "fat", required_unless_present = "fat")]
        thin: bool,
        /// Turn this thin sub into a fat sub
        #[arg(short, long)]
        fat: bool,
        #[arg(value_name = "SUB_NAME")]
        name: String,
    },
}

/// Flags understood by the driver every sub execs. Everything from the first
/// command token on is passed through untouched.
#[derive(Parser, Debug)]
#[command(name = "subdue-sub", disable_help_flag = true, disable_version_flag = true)]
pub struct SubCli {
    /// Exit 0 when the command must be evaluated by the calling shell, 1 otherwise
    #[arg(long)]
    pub is_eval: bool,
    /// Shell the wrapper function runs in; exported as _SUB_SHELL_
    #[arg(long)]
    pub shell: Option<String>,
    #[arg(short, long)]
    pub help: bool,
    /// Path of the driver script, normally "$0"
    #[arg(long, hide = true)]
    pub driver: Option<PathBuf>,
    /// Root of the sub, for thin subs and embedding
    #[arg(long, hide = true)]
    pub sub_path: Option<PathBuf>,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub args: Vec<OsString>,
}

impl SubCli {
    pub fn request(&self) -> DispatchRequest {
        DispatchRequest {
            is_eval: self.is_eval,
            help: self.help,
            shell: self.shell.clone(),
            args: self.args.clone(),
        }
    }
}
