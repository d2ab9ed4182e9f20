//! Configuration system for strata.
//!
//! strata uses TOML configuration files named `.strata.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.strata.toml` files found, then loading `~/.strata.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawPickerSettings, RawSearchSettings, RawSourceSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_source_path;
use serde::{Deserialize, Serialize};
use strata_tree::{DEFAULT_DEPTH, Mode};
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Deepest hierarchy the picker accepts.
pub const MAX_DEPTH: u8 = 8;

/// Top-level merged configuration for strata.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where node snapshots come from.
    pub source: SourceSettings,
    /// Picker behaviour.
    pub picker: PickerSettings,
    /// Search behaviour.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files that contributed, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.strata.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                debug!(path = %path.display(), "parsing config file");
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.strata.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            source: &self.source,
            picker: &self.picker,
            search: &self.search,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::Serialize { source })
    }
}

/// The `[source]` section after path resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Absolute path to the node snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The `[picker]` section.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PickerSettings {
    /// Click behaviour.
    pub mode: Mode,
    /// Number of levels in the hierarchy.
    pub depth: u8,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Selection,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// The `[search]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum normalized query length before filtering applies.
    pub min_length: usize,
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Node source.
    source: &'a SourceSettings,
    /// Picker behaviour.
    picker: &'a PickerSettings,
    /// Search behaviour.
    search: &'a SearchSettings,
}
