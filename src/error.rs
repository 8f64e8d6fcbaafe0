use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_NOT_FOUND: i32 = 127;
pub const EXIT_CONTAINER: i32 = 2;
pub const EXIT_EXEC_FAILED: i32 = 126;
/// Bad driver flags, builtin usage errors and I/O failures.
pub const EXIT_USAGE: i32 = 1;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{name}: no such command '{command}'")]
    NotFound { name: String, command: String },
    #[error("{name}: can't run a container '{command}'")]
    Container { name: String, command: String },
    #[error("{name}: failed to run {}: {source}", path.display())]
    Exec {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::NotFound { .. } => EXIT_NOT_FOUND,
            DispatchError::Container { .. } => EXIT_CONTAINER,
            DispatchError::Exec { .. } => EXIT_EXEC_FAILED,
            DispatchError::Usage(_) | DispatchError::Io(_) => EXIT_USAGE,
        }
    }
}
