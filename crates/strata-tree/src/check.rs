//! Data-quality checks for node snapshots.
//!
//! The engine trusts its input and degrades when the structure is off. These checks only
//! report what would make it degrade, so a snapshot can be diagnosed before use.

use std::{collections::HashSet, fmt};

use crate::{
    node::{Level, NodeId},
    store::NodeStore,
};

/// A structural problem in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeWarning {
    /// The id appeared more than once; later copies were dropped.
    DuplicateId {
        /// The repeated id.
        id: NodeId,
    },
    /// A parent id does not resolve to any node.
    MissingParent {
        /// The node with the dangling link.
        id: NodeId,
        /// The unresolved parent id.
        parent: NodeId,
    },
    /// A non-root node has no parent link.
    NoParent {
        /// The node.
        id: NodeId,
        /// Its level.
        level: Level,
    },
    /// A level-1 node names a parent.
    RootWithParent {
        /// The root node.
        id: NodeId,
        /// The parent it names.
        parent: NodeId,
    },
    /// A node's level is not one below its parent's.
    LevelMismatch {
        /// The node.
        id: NodeId,
        /// Its level.
        level: Level,
        /// Its parent.
        parent: NodeId,
        /// The parent's level.
        parent_level: Level,
    },
    /// A node sits deeper than the configured depth.
    BeyondDepth {
        /// The node.
        id: NodeId,
        /// Its level.
        level: Level,
        /// The configured depth.
        depth: u8,
    },
    /// Following parent links from this node leads back to it.
    Cycle {
        /// A node on the cycle.
        id: NodeId,
    },
}

impl fmt::Display for NodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "node {id} appears more than once"),
            Self::MissingParent { id, parent } => {
                write!(f, "node {id} references missing parent {parent}")
            }
            Self::NoParent { id, level } => {
                write!(f, "node {id} is at level {level} but has no parent")
            }
            Self::RootWithParent { id, parent } => {
                write!(f, "root node {id} names parent {parent}")
            }
            Self::LevelMismatch {
                id,
                level,
                parent,
                parent_level,
            } => write!(
                f,
                "node {id} is at level {level} but its parent {parent} is at level {parent_level}"
            ),
            Self::BeyondDepth { id, level, depth } => {
                write!(f, "node {id} is at level {level}, deeper than {depth}")
            }
            Self::Cycle { id } => write!(f, "node {id} is part of a parent-link cycle"),
        }
    }
}

/// Reports every structural problem in `store` for a hierarchy `depth` levels deep.
pub fn check_nodes(store: &NodeStore, depth: u8) -> Vec<NodeWarning> {
    let mut warnings: Vec<NodeWarning> = store
        .duplicates()
        .iter()
        .map(|&id| NodeWarning::DuplicateId { id })
        .collect();

    for node in store.iter() {
        if node.level.get() > depth {
            warnings.push(NodeWarning::BeyondDepth {
                id: node.id,
                level: node.level,
                depth,
            });
        }

        match (node.level.is_root(), node.parent_id) {
            (true, Some(parent)) => {
                warnings.push(NodeWarning::RootWithParent { id: node.id, parent });
            }
            (false, None) => warnings.push(NodeWarning::NoParent {
                id: node.id,
                level: node.level,
            }),
            (_, Some(parent)) => match store.get(parent) {
                None => warnings.push(NodeWarning::MissingParent { id: node.id, parent }),
                Some(p) if p.level.child() != node.level => {
                    warnings.push(NodeWarning::LevelMismatch {
                        id: node.id,
                        level: node.level,
                        parent,
                        parent_level: p.level,
                    });
                }
                Some(_) => {}
            },
            (true, None) => {}
        }

        if on_cycle(store, node.id) {
            warnings.push(NodeWarning::Cycle { id: node.id });
        }
    }

    warnings
}

/// Returns true if walking up from `start` returns to `start`.
fn on_cycle(store: &NodeStore, start: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut current = store.get(start).and_then(|node| node.parent_id);
    while let Some(id) = current {
        if id == start {
            return true;
        }
        if !seen.insert(id) {
            return false;
        }
        current = store.get(id).and_then(|node| node.parent_id);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn lvl(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn clean_forest_has_no_warnings() {
        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let a1a = Node::child_of(&a1, 100, "A1a");
        let store = NodeStore::from_nodes([a, a1, a1a]);
        assert!(check_nodes(&store, 4).is_empty());
    }

    #[test]
    fn reports_each_problem() {
        let a = Node::root(1, "A");
        let dup = Node::root(1, "A again");
        let dangling = Node {
            id: NodeId(10),
            level: lvl(2),
            name: "dangling".into(),
            parent_id: Some(NodeId(99)),
        };
        let no_parent = Node {
            id: NodeId(11),
            level: lvl(2),
            name: "floating".into(),
            parent_id: None,
        };
        let skip = Node {
            id: NodeId(12),
            level: lvl(3),
            name: "skips a level".into(),
            parent_id: Some(NodeId(1)),
        };
        let mut rooted = Node::root(2, "rooted");
        rooted.parent_id = Some(NodeId(1));
        let deep = Node {
            id: NodeId(13),
            level: lvl(5),
            name: "too deep".into(),
            parent_id: None,
        };

        let store = NodeStore::from_nodes([a, dup, dangling, no_parent, skip, rooted, deep]);
        let warnings = check_nodes(&store, 4);

        assert!(warnings.contains(&NodeWarning::DuplicateId { id: NodeId(1) }));
        assert!(warnings.contains(&NodeWarning::MissingParent {
            id: NodeId(10),
            parent: NodeId(99)
        }));
        assert!(warnings.contains(&NodeWarning::NoParent {
            id: NodeId(11),
            level: lvl(2)
        }));
        assert!(warnings.contains(&NodeWarning::LevelMismatch {
            id: NodeId(12),
            level: lvl(3),
            parent: NodeId(1),
            parent_level: lvl(1)
        }));
        assert!(warnings.contains(&NodeWarning::RootWithParent {
            id: NodeId(2),
            parent: NodeId(1)
        }));
        assert!(warnings.contains(&NodeWarning::BeyondDepth {
            id: NodeId(13),
            level: lvl(5),
            depth: 4
        }));
    }

    #[test]
    fn detects_cycles() {
        let x = Node {
            id: NodeId(1),
            level: lvl(2),
            name: "X".into(),
            parent_id: Some(NodeId(2)),
        };
        let y = Node {
            id: NodeId(2),
            level: lvl(2),
            name: "Y".into(),
            parent_id: Some(NodeId(1)),
        };
        let store = NodeStore::from_nodes([x, y]);
        let warnings = check_nodes(&store, 4);
        assert!(warnings.contains(&NodeWarning::Cycle { id: NodeId(1) }));
        assert!(warnings.contains(&NodeWarning::Cycle { id: NodeId(2) }));
    }

    #[test]
    fn warnings_render() {
        let warning = NodeWarning::MissingParent {
            id: NodeId(10),
            parent: NodeId(99),
        };
        assert_eq!(warning.to_string(), "node 10 references missing parent 99");
    }
}
