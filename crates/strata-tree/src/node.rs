//! Hierarchy node types.
//!
//! A node is one entry in a bounded-depth forest: it carries its own level and an optional
//! link to its parent. Levels are 1-based, so level-1 nodes are roots.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TreeError;

/// Identifier of a hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Depth of a node in the hierarchy, starting at 1 for roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// The root level.
    pub const ROOT: Self = Self(1);

    /// Creates a level, returning `None` for 0.
    pub const fn new(level: u8) -> Option<Self> {
        if level == 0 { None } else { Some(Self(level)) }
    }

    /// Returns the numeric level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true for level 1.
    pub const fn is_root(self) -> bool {
        self.0 == 1
    }

    /// Returns the level directly above this one, or `None` at the root.
    pub const fn parent(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }

    /// Returns the level directly below this one.
    pub const fn child(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Iterates over every level strictly above this one, root first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        (1..self.0).map(Self)
    }

    /// Iterates over levels `1..=depth`.
    pub fn up_to(depth: u8) -> impl Iterator<Item = Self> {
        (1..=depth).map(Self)
    }
}

impl TryFrom<u8> for Level {
    type Error = TreeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(TreeError::InvalidLevel { level: value })
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Depth of this node (1 for roots).
    pub level: Level,
    /// Display name.
    pub name: String,
    /// The parent node's id; `None` for roots.
    #[serde(default, alias = "parentLevelId", alias = "parent_id")]
    pub parent_id: Option<NodeId>,
}

impl Node {
    /// Creates a root node.
    pub fn root(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            level: Level::ROOT,
            name: name.into(),
            parent_id: None,
        }
    }

    /// Creates a node one level below `parent`.
    pub fn child_of(parent: &Self, id: u64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            level: parent.level.child(),
            name: name.into(),
            parent_id: Some(parent.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_rejected() {
        assert!(Level::new(0).is_none());
        assert!(matches!(
            Level::try_from(0),
            Err(TreeError::InvalidLevel { level: 0 })
        ));
    }

    #[test]
    fn level_navigation() {
        let three = Level::new(3).unwrap();
        assert_eq!(three.parent(), Level::new(2));
        assert_eq!(three.child(), Level::new(4).unwrap());
        assert!(Level::ROOT.parent().is_none());
        let above: Vec<u8> = three.ancestors().map(Level::get).collect();
        assert_eq!(above, vec![1, 2]);
    }

    #[test]
    fn deserializes_camel_case_and_aliases() {
        let json = r#"[
            {"id": 1, "name": "North", "level": 1},
            {"id": 2, "name": "Depot", "level": 2, "parentId": 1},
            {"id": 3, "name": "Aisle", "level": 3, "parentLevelId": 2},
            {"id": 4, "name": "Shelf", "level": 4, "parent_id": 3}
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].parent_id, None);
        assert_eq!(nodes[1].parent_id, Some(NodeId(1)));
        assert_eq!(nodes[2].parent_id, Some(NodeId(2)));
        assert_eq!(nodes[3].parent_id, Some(NodeId(3)));
        assert_eq!(nodes[3].level.get(), 4);
    }

    #[test]
    fn deserializing_level_zero_fails() {
        let json = r#"{"id": 1, "name": "Bad", "level": 0}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn node_id_parses_from_text() {
        assert_eq!(" 42 ".parse::<NodeId>().unwrap(), NodeId(42));
        assert!("abc".parse::<NodeId>().is_err());
    }
}
