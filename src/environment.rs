//! Context handed from the dispatcher to the command it runs.
//!
//! Everything a command learns about the tree that launched it travels through
//! `_SUB_<FIELD>_` variables and the PATH. [`Environment`] collects those values
//! and writes them to an [`EnvTarget`] in a single [`Environment::commit`].

use crate::paths::PathContext;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

/// Fields exported to commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubVar {
    Name,
    Command,
    PathCommand,
    PathRoot,
    PathShared,
    PathLib,
    IsEval,
    Shell,
}

impl SubVar {
    pub const ALL: [SubVar; 8] = [
        SubVar::Name,
        SubVar::Command,
        SubVar::PathCommand,
        SubVar::PathRoot,
        SubVar::PathShared,
        SubVar::PathLib,
        SubVar::IsEval,
        SubVar::Shell,
    ];

    pub fn field(self) -> &'static str {
        match self {
            SubVar::Name => "NAME",
            SubVar::Command => "COMMAND",
            SubVar::PathCommand => "PATH_COMMAND",
            SubVar::PathRoot => "PATH_ROOT",
            SubVar::PathShared => "PATH_SHARED",
            SubVar::PathLib => "PATH_LIB",
            SubVar::IsEval => "IS_EVAL",
            SubVar::Shell => "SHELL",
        }
    }

    /// Name of the process variable, e.g. `_SUB_PATH_ROOT_`.
    pub fn var_name(self) -> String {
        format!("_SUB_{}_", self.field())
    }
}

/// Where committed variables end up. Values are kept as raw OS strings so
/// nothing inherited is re-encoded on its way to the child.
pub trait EnvTarget {
    fn get(&self, key: &str) -> Option<OsString>;
    fn set(&mut self, key: &str, value: &OsStr);
    fn snapshot(&self) -> EnvSnapshot;
}

/// The real process environment.
#[derive(Debug, Default)]
pub struct OsEnv;

impl EnvTarget for OsEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
    fn set(&mut self, key: &str, value: &OsStr) {
        std::env::set_var(key, value);
    }
    fn snapshot(&self) -> EnvSnapshot {
        EnvSnapshot(std::env::vars_os().collect())
    }
}

/// A detached environment, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: BTreeMap<OsString, OsString>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of the current process environment.
    pub fn inherit() -> Self {
        MemoryEnv { vars: OsEnv.snapshot().0 }
    }

    pub fn with(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.vars.insert(key.into(), value.as_ref().to_os_string());
        self
    }
}

impl EnvTarget for MemoryEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(OsStr::new(key)).cloned()
    }
    fn set(&mut self, key: &str, value: &OsStr) {
        self.vars.insert(key.into(), value.to_os_string());
    }
    fn snapshot(&self) -> EnvSnapshot {
        EnvSnapshot(self.vars.clone())
    }
}

/// Frozen variable set a child process is started with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvSnapshot(BTreeMap<OsString, OsString>);

impl EnvSnapshot {
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.0.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// The value when it is valid UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OsStr::to_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.0.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

/// Pending `_SUB_*_` values and PATH for one dispatch.
pub struct Environment<'t> {
    target: &'t mut dyn EnvTarget,
    fields: BTreeMap<SubVar, Option<OsString>>,
    search_path: Vec<PathBuf>,
}

impl<'t> Environment<'t> {
    pub fn new(paths: &PathContext, target: &'t mut dyn EnvTarget) -> Self {
        let search_path = target
            .get("PATH")
            .map(|p| split_search_path(&p))
            .unwrap_or_default();
        let mut env = Environment {
            target,
            fields: SubVar::ALL.iter().map(|f| (*f, None)).collect(),
            search_path,
        };
        env.set(SubVar::Name, &paths.name);
        env.set(SubVar::Command, "");
        env.set(SubVar::PathRoot, &paths.root);
        env.set(SubVar::PathShared, &paths.shared_dir);
        env.set(SubVar::PathLib, &paths.lib_dir);
        env.set(SubVar::IsEval, "0");
        env
    }

    pub fn set(&mut self, field: SubVar, value: impl Into<OsString>) {
        self.fields.insert(field, Some(value.into()));
    }

    /// Mark a field as absent. It is still exported, as an empty string.
    pub fn clear(&mut self, field: SubVar) {
        self.fields.insert(field, None);
    }

    pub fn get(&self, field: SubVar) -> Option<&OsStr> {
        self.fields.get(&field).and_then(|v| v.as_deref())
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn prepend_to_path(&mut self, dir: impl AsRef<Path>, immediate: bool) {
        self.search_path.insert(0, dir.as_ref().to_path_buf());
        if immediate {
            self.apply_path();
        }
    }

    pub fn append_to_path(&mut self, dir: impl AsRef<Path>, immediate: bool) {
        self.search_path.push(dir.as_ref().to_path_buf());
        if immediate {
            self.apply_path();
        }
    }

    fn apply_path(&mut self) {
        let joined = join_search_path(&self.search_path);
        self.target.set("PATH", &joined);
    }

    /// Write every field and the PATH to the target, then freeze the result.
    pub fn commit(&mut self) -> EnvSnapshot {
        for (field, value) in &self.fields {
            let value = value.as_deref().unwrap_or_default();
            self.target.set(&field.var_name(), value);
        }
        self.apply_path();
        self.target.snapshot()
    }
}

fn split_search_path(raw: &OsStr) -> Vec<PathBuf> {
    if raw.is_empty() {
        return Vec::new();
    }
    std::env::split_paths(raw).collect()
}

// Joined byte for byte. `env::join_paths` refuses entries that contain the
// separator, which the shell would accept and split.
fn join_search_path(dirs: &[PathBuf]) -> OsString {
    let mut joined = OsString::new();
    for (i, dir) in dirs.iter().enumerate() {
        if i > 0 {
            joined.push(PATH_SEPARATOR);
        }
        joined.push(dir);
    }
    joined
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::ffi::OsStrExt;

    fn ctx() -> PathContext {
        PathContext::from_driver(Path::new("/opt/mysub/bin/mysub"), None)
    }

    #[test]
    fn commit_exports_full_variable_set() {
        let paths = ctx();
        let mut target = MemoryEnv::new().with("PATH", "/usr/bin:/bin");
        let mut env = Environment::new(&paths, &mut target);
        env.clear(SubVar::Shell);
        let snap = env.commit();
        for field in SubVar::ALL {
            assert!(snap.get(&field.var_name()).is_some(), "{field:?} missing");
        }
        assert_eq!(snap.get_str("_SUB_NAME_"), Some("mysub"));
        assert_eq!(snap.get_str("_SUB_PATH_ROOT_"), Some("/opt/mysub"));
        assert_eq!(snap.get_str("_SUB_PATH_LIB_"), Some("/opt/mysub/lib"));
        assert_eq!(snap.get_str("_SUB_PATH_SHARED_"), Some("/opt/mysub/shared"));
        assert_eq!(snap.get_str("_SUB_IS_EVAL_"), Some("0"));
        assert_eq!(snap.get_str("_SUB_SHELL_"), Some(""));
        assert_eq!(snap.get_str("_SUB_PATH_COMMAND_"), Some(""));
    }

    #[test]
    fn prepends_put_last_one_first() {
        let paths = ctx();
        let mut target = MemoryEnv::new().with("PATH", "/usr/bin");
        let mut env = Environment::new(&paths, &mut target);
        env.prepend_to_path(&paths.lib_dir, false);
        env.prepend_to_path(&paths.bin_dir, false);
        env.append_to_path("/extra", false);
        let snap = env.commit();
        assert_eq!(
            snap.get_str("PATH"),
            Some("/opt/mysub/bin:/opt/mysub/lib:/usr/bin:/extra")
        );
    }

    #[test]
    fn path_is_deferred_unless_immediate() {
        let paths = ctx();
        let mut target = MemoryEnv::new().with("PATH", "/usr/bin");
        {
            let mut env = Environment::new(&paths, &mut target);
            env.prepend_to_path("/deferred", false);
        }
        assert_eq!(target.get("PATH"), Some("/usr/bin".into()));
        {
            let mut env = Environment::new(&paths, &mut target);
            env.prepend_to_path("/now", true);
        }
        assert_eq!(target.get("PATH"), Some("/now:/usr/bin".into()));
        assert_eq!(target.get("_SUB_NAME_"), None);
    }

    #[test]
    fn commit_is_idempotent() {
        let paths = ctx();
        let mut target = MemoryEnv::new().with("PATH", "/usr/bin");
        let mut env = Environment::new(&paths, &mut target);
        env.prepend_to_path("/x", false);
        env.set(SubVar::Shell, "bash");
        let first = env.commit();
        let second = env.commit();
        assert_eq!(first, second);
        assert_eq!(second.get_str("PATH"), Some("/x:/usr/bin"));
    }

    #[test]
    fn missing_path_starts_empty() {
        let paths = ctx();
        let mut target = MemoryEnv::new();
        let mut env = Environment::new(&paths, &mut target);
        env.prepend_to_path("/only", false);
        assert_eq!(env.commit().get_str("PATH"), Some("/only"));
    }

    #[test]
    fn pending_values_are_readable_before_commit() {
        let paths = ctx();
        let mut target = MemoryEnv::new().with("PATH", "/usr/bin:/bin");
        let mut env = Environment::new(&paths, &mut target);
        assert_eq!(env.get(SubVar::Name), Some(OsStr::new("mysub")));
        assert_eq!(env.get(SubVar::PathCommand), None);
        env.set(SubVar::Shell, "zsh");
        env.clear(SubVar::Name);
        assert_eq!(env.get(SubVar::Shell), Some(OsStr::new("zsh")));
        assert_eq!(env.get(SubVar::Name), None);

        env.prepend_to_path("/first", false);
        let expected: Vec<PathBuf> = ["/first", "/usr/bin", "/bin"].iter().map(PathBuf::from).collect();
        assert_eq!(env.search_path(), &expected[..]);
    }

    #[test]
    fn non_utf8_values_survive_commit() {
        let paths = ctx();
        let odd = OsStr::from_bytes(b"a\xffb");
        let mut odd_path = OsString::from("/usr/bin:/opt/");
        odd_path.push(odd);
        let mut target = MemoryEnv::new().with("PATH", &odd_path).with("KEEP", odd);
        let mut env = Environment::new(&paths, &mut target);
        env.prepend_to_path("/x", false);
        let snap = env.commit();
        assert_eq!(snap.get("KEEP"), Some(odd));
        assert_eq!(
            snap.get("PATH").map(OsStr::as_bytes),
            Some(&b"/x:/usr/bin:/opt/a\xffb"[..])
        );
    }
}
