//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use strata_config::Config;
use strata_tree::{JsonFileSource, Mode, NodeSource, NodeStore, Picker};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Snapshot path given on the command line, overriding `[source] path`.
    nodes_override: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(nodes_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        debug!(files = config.files.len(), "configuration loaded");
        Ok(Self {
            cwd,
            config,
            nodes_override,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only(nodes_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            nodes_override,
        })
    }

    /// The `--nodes` path, if one was given.
    pub fn nodes_override(&self) -> Option<&Path> {
        self.nodes_override.as_deref()
    }

    /// The snapshot path in effect: `--nodes` first, then the configured source.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.nodes_override
            .as_ref()
            .map(|path| self.cwd.join(path))
            .or_else(|| self.config.source.path.clone())
    }

    /// Loads the node snapshot, exiting with an error if none is configured or it fails.
    pub fn load_store(&self) -> Result<Arc<NodeStore>, ExitCode> {
        let Some(path) = self.source_path() else {
            eprintln!("error: no node source configured");
            eprintln!("Pass --nodes FILE, or set [source] path in .strata.toml (see 'strata init').");
            return Err(ExitCode::FAILURE);
        };
        load_store_from(&path).map(Arc::new)
    }

    /// Builds a picker over `store` using the configured depth and search settings.
    pub fn picker(&self, store: Arc<NodeStore>, mode: Mode) -> Picker {
        Picker::new(store, mode, self.config.picker.depth)
            .with_min_search_length(self.config.search.min_length)
    }
}

/// Reads and indexes a JSON snapshot.
fn load_store_from(path: &Path) -> Result<NodeStore, ExitCode> {
    JsonFileSource::new(path).load_store().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
