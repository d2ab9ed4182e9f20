//! Configuration merging.
//!
//! Folds several `RawConfig` files into one `Config`. For every setting the file closest to
//! the working directory wins.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, MAX_DEPTH, PickerSettings, SearchSettings, SourceSettings,
    parse::{RawConfig, RawPickerSettings},
    resolve::resolve_source_path,
};

/// A parsed config file with its source path.
#[derive(Debug)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory holding the config file; relative paths inside it resolve from here.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs must be in precedence order: highest first (closest to the working directory),
/// global last. Scalars take the first defined value. The source path is resolved relative
/// to the file that defined it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    Ok(Config {
        source: merge_source(configs)?,
        picker: merge_picker(configs)?,
        search: merge_search(configs),
        config_root: configs.first().map(|c| c.dir().to_path_buf()),
        files: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Picks the highest-precedence source path and resolves it.
fn merge_source(configs: &[ParsedConfig]) -> Result<SourceSettings, ConfigError> {
    let defined = configs.iter().find_map(|parsed| {
        let path = parsed.config.source.as_ref()?.path.as_deref()?;
        Some((path, parsed.dir()))
    });
    let path = defined
        .map(|(path, dir)| resolve_source_path(path, dir))
        .transpose()?;
    Ok(SourceSettings { path })
}

/// Merges picker settings, rejecting out-of-range depths.
fn merge_picker(configs: &[ParsedConfig]) -> Result<PickerSettings, ConfigError> {
    let mut result = PickerSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref picker) = parsed.config.picker {
            apply_raw_picker(&mut result, picker, &parsed.path)?;
        }
    }

    Ok(result)
}

/// Applies one file's picker settings.
fn apply_raw_picker(
    result: &mut PickerSettings,
    raw: &RawPickerSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(mode) = raw.mode {
        result.mode = mode;
    }
    if let Some(depth) = raw.depth {
        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(ConfigError::InvalidSetting {
                path: path.to_path_buf(),
                key: "picker.depth",
                message: format!("{depth} is outside 1..={MAX_DEPTH}"),
            });
        }
        result.depth = depth;
    }
    Ok(())
}

/// Merges search settings.
fn merge_search(configs: &[ParsedConfig]) -> SearchSettings {
    let min_length = configs
        .iter()
        .find_map(|parsed| parsed.config.search.as_ref()?.min_length);
    let mut result = SearchSettings::default();
    if let Some(v) = min_length {
        result.min_length = v;
    }
    result
}
