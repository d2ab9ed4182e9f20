//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No `[source] path` is configured.
    NoSourceDefined,
    /// The source path does not exist.
    SourceMissing {
        /// The resolved path.
        path: String,
    },
    /// The source path exists but is not a file.
    SourceNotFile {
        /// The resolved path.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSourceDefined => write!(f, "no node source is configured"),
            Self::SourceMissing { path } => write!(f, "node source does not exist: {path}"),
            Self::SourceNotFile { path } => write!(f, "node source is not a file: {path}"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let Some(path) = &config.source.path else {
        return vec![ConfigWarning::NoSourceDefined];
    };
    let display = path.display().to_string();
    if !path.exists() {
        vec![ConfigWarning::SourceMissing { path: display }]
    } else if !path.is_file() {
        vec![ConfigWarning::SourceNotFile { path: display }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{SourceSettings, test_support::TestDir};

    fn with_source(path: Option<PathBuf>) -> Config {
        Config {
            source: SourceSettings { path },
            ..Config::default()
        }
    }

    #[test]
    fn test_no_source() {
        assert_eq!(
            validate_config(&Config::default()),
            vec![ConfigWarning::NoSourceDefined]
        );
    }

    #[test]
    fn test_source_states() {
        let dir = TestDir::new();
        let file = dir.create_file("nodes.json", "[]");
        assert!(validate_config(&with_source(Some(file))).is_empty());

        let missing = dir.path().join("gone.json");
        assert!(matches!(
            validate_config(&with_source(Some(missing)))[..],
            [ConfigWarning::SourceMissing { .. }]
        ));

        let folder = dir.create_dir("folder");
        assert!(matches!(
            validate_config(&with_source(Some(folder)))[..],
            [ConfigWarning::SourceNotFile { .. }]
        ));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::SourceMissing {
            path: "/data/nodes.json".into(),
        };
        assert_eq!(warning.to_string(), "node source does not exist: /data/nodes.json");
    }
}
