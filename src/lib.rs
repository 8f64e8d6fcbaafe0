pub mod builtins;
pub mod cli;
pub mod command_handlers;
pub mod config;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod logging;
pub mod paths;
pub mod platform;
pub mod resolver;
pub mod runner;

#[cfg(all(test, unix))]
mod testutil;

pub use dispatch::{DispatchRequest, Dispatcher};
pub use environment::{EnvSnapshot, EnvTarget, Environment, MemoryEnv, OsEnv, SubVar};
pub use error::DispatchError;
pub use paths::PathContext;
pub use resolver::{resolve, ResolvedCommand, Target};
pub use runner::{CommandRunner, ExecRunner, SpawnRunner};
