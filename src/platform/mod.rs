pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use anyhow::Result;
use std::path::Path;
use std::process::{Command, ExitStatus};

pub trait PlatformOps: Sync + Send {
    /// True for a regular file the invoking user may execute.
    fn is_executable(&self, path: &Path) -> bool;
    fn make_executable(&self, path: &Path) -> Result<()>;
    /// Turn the current process into `cmd`. Only returns when that fails.
    fn replace_process(&self, cmd: Command) -> std::io::Error;
    fn status_code(&self, status: ExitStatus) -> i32;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
