use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A throwaway command tree under the system temp dir.
pub struct TempTree {
    root: PathBuf,
}

impl TempTree {
    pub fn new(label: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir()
            .join(format!("subdue_unit_{}_{}_{}", std::process::id(), n, label));
        let _ = std::fs::remove_dir_all(&root);
        for d in ["bin", "commands", "lib", "shared"] {
            std::fs::create_dir_all(root.join(d)).unwrap();
        }
        TempTree { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn commands(&self) -> PathBuf {
        self.root.join("commands")
    }

    pub fn command(&self, rel: &str) -> PathBuf {
        self.command_with(rel, "")
    }

    pub fn command_with(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.plain_file_with(rel, &format!("#!/bin/sh\n{body}\n"));
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    pub fn plain_file(&self, rel: &str) -> PathBuf {
        self.plain_file_with(rel, "")
    }

    fn plain_file_with(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.commands().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.commands().join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }
}

impl Drop for TempTree {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
