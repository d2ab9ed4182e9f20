//! Configuration file parsing.
//!
//! Parses individual `.strata.toml` files into `RawConfig` structures where every field is
//! optional, ready for merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use strata_tree::Mode;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Node data source section.
    pub source: Option<RawSourceSettings>,
    /// Picker behaviour section.
    pub picker: Option<RawPickerSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
}

/// Raw `[source]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSourceSettings {
    /// Path to the node snapshot, relative to the config file.
    pub path: Option<String>,
}

/// Raw `[picker]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPickerSettings {
    /// Click behaviour. Parsed leniently through `Mode`'s `FromStr`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub mode: Option<Mode>,
    /// Number of levels in the hierarchy.
    pub depth: Option<u8>,
}

/// Raw `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Minimum normalized query length before filtering applies.
    pub min_length: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str::<RawConfig>(&contents).ok())
        .is_some_and(|config| config.root == Some(true))
}
