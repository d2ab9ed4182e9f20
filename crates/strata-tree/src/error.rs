//! Error types for loading hierarchy snapshots.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading node data.
///
/// The engine operations themselves never fail; these only cover getting a snapshot
/// into memory.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Failed to read a node snapshot file.
    #[error("failed to read node file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a node snapshot.
    #[error("failed to parse node file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A node declared level 0.
    #[error("invalid node level {level}: levels start at 1")]
    InvalidLevel {
        /// The rejected level.
        level: u8,
    },
}
