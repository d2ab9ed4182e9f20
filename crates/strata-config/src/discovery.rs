//! Configuration file discovery.
//!
//! Walks up from a starting directory collecting `.strata.toml` files, then appends the
//! global `~/.strata.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".strata.toml";

/// Discovers all configuration files relevant to `cwd`.
///
/// Returns paths in precedence order: closest to `cwd` first, global last. A file with
/// `root = true` ends the walk, and the global file is then skipped too.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let is_root = is_root_config(&candidate);
        configs.push(candidate);
        if is_root {
            debug!(files = configs.len(), "root config reached, skipping global config");
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    debug!(files = configs.len(), "discovered config files");
    configs
}

/// Returns the path to the global configuration file (`~/.strata.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Discovered files minus the machine's global config.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_nothing() {
        let dir = TestDir::new();
        let sub = dir.create_dir("a/b");
        assert!(local(&discover_config_files(&sub)).is_empty());
    }

    #[test]
    fn test_closest_first() {
        let dir = TestDir::new();
        let outer = dir.create_config_at_root();
        let inner = dir.create_config("warehouse");
        let cwd = dir.create_dir("warehouse/east");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&inner, &outer]);
    }

    #[test]
    fn test_root_config_stops_walk() {
        let dir = TestDir::new();
        dir.create_config_at_root();
        let root = dir.create_root_config("project");
        let child = dir.create_config("project/sub");
        let cwd = dir.create_dir("project/sub/deep");

        // Neither the outer file nor the global one is included.
        assert_eq!(discover_config_files(&cwd), vec![child, root]);
    }

    #[test]
    fn test_root_false_keeps_walking() {
        let dir = TestDir::new();
        let outer = dir.create_config_at_root();
        let mid = dir.create_config_with_content("project", "root = false\n");
        let cwd = dir.create_dir("project/src");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&mid, &outer]);
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let dir = TestDir::new();
        fs::create_dir_all(dir.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = dir.create_dir("sub");
        assert!(local(&discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn test_global_config_path() {
        let global = global_config_path().unwrap();
        assert!(global.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&global));
        assert!(!is_global_config(Path::new("/srv/project/.strata.toml")));
    }
}
