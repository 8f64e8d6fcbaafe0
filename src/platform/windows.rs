use crate::platform::PlatformOps;
use anyhow::Result;
use std::path::Path;
use std::process::{Command, ExitStatus};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com", "ps1"];

impl PlatformOps for Windows {
    fn is_executable(&self, path: &Path) -> bool {
        if !path.is_file() { return false; }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => EXECUTABLE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(ext)),
            None => true,
        }
    }
    fn make_executable(&self, _path: &Path) -> Result<()> { Ok(()) }
    fn replace_process(&self, mut cmd: Command) -> std::io::Error {
        match cmd.status() {
            Ok(status) => std::process::exit(self.status_code(status)),
            Err(e) => e,
        }
    }
    fn status_code(&self, status: ExitStatus) -> i32 { status.code().unwrap_or(1) }
}
