use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const CONFIG_FILE: &str = "sub.toml";

/// Optional per-tree settings read from `<root>/sub.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SubConfig {
    /// One line shown under the usage line of `help`.
    #[serde(default)]
    pub summary: Option<String>,
    /// Free text printed after the command listing of `help`.
    #[serde(default)]
    pub help: Option<String>,
}

impl SubConfig {
    /// Missing file means defaults. A broken file is reported and ignored so
    /// that a typo never stops commands from running.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let data = match fs_err::read_to_string(&path) {
            Ok(d) => d,
            Err(_) => return Self::default(),
        };
        match toml::from_str::<SubConfig>(&data) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable sub config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_and_help() {
        let cfg: SubConfig =
            toml::from_str("summary = \"Ops tools\"\nhelp = \"See the wiki.\"\n").unwrap();
        assert_eq!(cfg.summary.as_deref(), Some("Ops tools"));
        assert_eq!(cfg.help.as_deref(), Some("See the wiki."));
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = SubConfig::load(Path::new("/nonexistent/subdue/root"));
        assert_eq!(cfg, SubConfig::default());
    }

    #[test]
    fn malformed_file_is_default() {
        let dir = std::env::temp_dir().join(format!("subdue_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "summary = [unterminated").unwrap();
        assert_eq!(SubConfig::load(&dir), SubConfig::default());
        let _ = std::fs::remove_dir_all(dir);
    }
}
