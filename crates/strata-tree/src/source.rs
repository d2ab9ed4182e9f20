//! Loading node snapshots from an external data source.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    TreeError,
    node::{Node, NodeId},
    store::NodeStore,
};

/// Something that can hand over the full flat node list.
///
/// The engine treats the result as a snapshot; it never subscribes to changes. Fetch a new
/// snapshot and call [`crate::Picker::refresh`] to pick up new data.
pub trait NodeSource {
    /// Returns every node in the hierarchy.
    fn load_nodes(&self) -> Result<Vec<Node>, TreeError>;

    /// Returns the direct children of `parent`, in snapshot order.
    ///
    /// The default filters a full load. Sources that can query children directly may
    /// override it.
    fn children_of(&self, parent: NodeId) -> Result<Vec<Node>, TreeError> {
        Ok(self
            .load_nodes()?
            .into_iter()
            .filter(|node| node.parent_id == Some(parent))
            .collect())
    }

    /// Loads the nodes and indexes them.
    fn load_store(&self) -> Result<NodeStore, TreeError> {
        Ok(NodeStore::from_nodes(self.load_nodes()?))
    }
}

/// The shapes a node file may take on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    /// A bare array of nodes.
    List(Vec<Node>),
    /// An API-style envelope with the nodes under `data`.
    Wrapped {
        /// The nodes.
        data: Vec<Node>,
    },
}

/// Parses a JSON node list, accepting a bare array or a `{"data": [...]}` envelope.
///
/// The `path` parameter is used for error reporting.
pub fn parse_nodes(contents: &str, path: &Path) -> Result<Vec<Node>, TreeError> {
    let payload: Payload =
        serde_json::from_str(contents).map_err(|source| TreeError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match payload {
        Payload::List(nodes) | Payload::Wrapped { data: nodes } => nodes,
    })
}

/// Reads nodes from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    /// Path to the JSON file.
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NodeSource for JsonFileSource {
    fn load_nodes(&self) -> Result<Vec<Node>, TreeError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| TreeError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        let nodes = parse_nodes(&contents, &self.path)?;
        debug!(path = %self.path.display(), nodes = nodes.len(), "loaded node snapshot");
        Ok(nodes)
    }
}

/// A source backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    /// The nodes handed out on every load.
    nodes: Vec<Node>,
}

impl StaticSource {
    /// Creates a source that always returns `nodes`.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl NodeSource for StaticSource {
    fn load_nodes(&self) -> Result<Vec<Node>, TreeError> {
        Ok(self.nodes.clone())
    }
}
