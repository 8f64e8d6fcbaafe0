use std::path::{Path, PathBuf};

/// Fixed directory layout of one command tree.
///
/// Everything is derived from the driver location: the driver lives in
/// `root/bin`, commands in `root/commands`, and so on. Passing an explicit root
/// keeps the driver name but relocates every other directory under that root.
/// Nothing here touches the filesystem beyond making the driver path absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub name: String,
    pub driver: PathBuf,
    pub bin_dir: PathBuf,
    pub root: PathBuf,
    pub commands_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub shared_dir: PathBuf,
}

impl PathContext {
    pub fn from_driver(driver: &Path, root_override: Option<&Path>) -> Self {
        let driver = absolute(driver);
        let name = driver
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let bin_dir = driver
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let root = match root_override {
            Some(r) => absolute(r),
            None => bin_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| bin_dir.clone()),
        };
        PathContext {
            name,
            commands_dir: root.join("commands"),
            lib_dir: root.join("lib"),
            shared_dir: root.join("shared"),
            driver,
            bin_dir,
            root,
        }
    }

    /// Layout for the driver that is running right now.
    pub fn current(driver: Option<&Path>, root_override: Option<&Path>) -> std::io::Result<Self> {
        let driver = match driver {
            Some(d) => d.to_path_buf(),
            None => std::env::current_exe()?,
        };
        Ok(Self::from_driver(&driver, root_override))
    }
}

fn absolute(p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(p))
        .unwrap_or_else(|_| p.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_follows_driver_location() {
        let ctx = PathContext::from_driver(Path::new("/opt/mysub/bin/mysub"), None);
        assert_eq!(ctx.name, "mysub");
        assert_eq!(ctx.bin_dir, Path::new("/opt/mysub/bin"));
        assert_eq!(ctx.root, Path::new("/opt/mysub"));
        assert_eq!(ctx.commands_dir, Path::new("/opt/mysub/commands"));
        assert_eq!(ctx.lib_dir, Path::new("/opt/mysub/lib"));
        assert_eq!(ctx.shared_dir, Path::new("/opt/mysub/shared"));
    }

    #[test]
    fn override_moves_everything_but_name_and_bin() {
        let ctx = PathContext::from_driver(
            Path::new("/tmp/drivers/drivername"),
            Some(Path::new("/srv/thin")),
        );
        assert_eq!(ctx.name, "drivername");
        assert_eq!(ctx.bin_dir, Path::new("/tmp/drivers"));
        assert_eq!(ctx.root, Path::new("/srv/thin"));
        assert_eq!(ctx.commands_dir, Path::new("/srv/thin/commands"));
        assert_eq!(ctx.lib_dir, Path::new("/srv/thin/lib"));
        assert_eq!(ctx.shared_dir, Path::new("/srv/thin/shared"));
    }

    #[test]
    fn relative_driver_is_made_absolute() {
        let ctx = PathContext::from_driver(Path::new("x/bin/x"), None);
        assert!(ctx.root.is_absolute());
        assert!(ctx.commands_dir.ends_with("x/commands"));
    }
}
