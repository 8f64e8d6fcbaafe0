use crate::platform::PlatformOps;
use anyhow::Result;
use nix::unistd::{access, AccessFlags};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus};

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn is_executable(&self, path: &Path) -> bool {
        let is_file = fs_err::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        // access(2) answers for the calling user, not for any user
        is_file && access(path, AccessFlags::X_OK).is_ok()
    }
    fn make_executable(&self, path: &Path) -> Result<()> {
        let mut perms = fs_err::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs_err::set_permissions(path, perms)?;
        Ok(())
    }
    fn replace_process(&self, mut cmd: Command) -> std::io::Error {
        cmd.exec()
    }
    fn status_code(&self, status: ExitStatus) -> i32 {
        if let Some(code) = status.code() {
            code
        } else if let Some(signal) = status.signal() {
            128 + signal
        } else {
            255
        }
    }
}
