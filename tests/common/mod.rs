#![allow(dead_code)]

use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A fat sub under the system temp dir whose driver execs the freshly built
/// `subdue-sub`.
pub struct TempSub {
    pub name: String,
    pub root: PathBuf,
}

impl TempSub {
    pub fn new(name: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let base = std::env::temp_dir().join(format!("subdue_it_{}_{}", std::process::id(), n));
        let _ = std::fs::remove_dir_all(&base);
        let root = base.join(name);
        for d in ["bin", "commands", "lib", "shared"] {
            std::fs::create_dir_all(root.join(d)).unwrap();
        }
        let sub = TempSub { name: name.to_string(), root };
        let driver = format!(
            "#!/bin/sh\nexec '{}' --driver \"$0\" \"$@\"\n",
            env!("CARGO_BIN_EXE_subdue-sub")
        );
        write_executable(&sub.driver(), &driver);
        sub
    }

    pub fn driver(&self) -> PathBuf {
        self.root.join("bin").join(&self.name)
    }

    pub fn commands(&self) -> PathBuf {
        self.root.join("commands")
    }

    pub fn create_subcommand(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.commands().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        write_executable(&path, &format!("#!/bin/sh\n{body}\n"));
        path
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(self.driver()).args(args).output().unwrap()
    }

    pub fn run_with(&self, args: &[&OsStr], env: &[(&str, &OsStr)]) -> Output {
        Command::new(self.driver())
            .args(args)
            .envs(env.iter().copied())
            .output()
            .unwrap()
    }
}

impl Drop for TempSub {
    fn drop(&mut self) {
        if let Some(base) = self.root.parent() {
            let _ = std::fs::remove_dir_all(base);
        }
    }
}

pub fn write_executable(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}
