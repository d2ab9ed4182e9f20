//! Indexed, read-only snapshot of all hierarchy nodes.

use std::collections::HashMap;

use tracing::warn;

use crate::node::{Level, Node, NodeId};

/// An immutable snapshot of the forest, indexed by id and by parent.
///
/// The store is built once per snapshot and never patched. To pick up new data, build a
/// new store; anything memoized on the old one (see [`crate::DescendantCache`]) is then
/// rebuilt.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    /// Nodes in snapshot order, duplicates removed.
    nodes: Vec<Node>,
    /// Position of each node in `nodes`.
    by_id: HashMap<NodeId, usize>,
    /// Direct children of each parent id, in snapshot order.
    children: HashMap<NodeId, Vec<NodeId>>,
    /// Ids that appeared more than once in the input.
    duplicates: Vec<NodeId>,
}

impl NodeStore {
    /// Builds a store from a flat node list.
    ///
    /// When an id occurs more than once, the first occurrence wins and the rest are dropped.
    pub fn from_nodes(input: impl IntoIterator<Item = Node>) -> Self {
        let mut store = Self::default();
        for node in input {
            if store.by_id.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate node id in snapshot, keeping first occurrence");
                store.duplicates.push(node.id);
                continue;
            }
            if let Some(parent) = node.parent_id {
                store.children.entry(parent).or_default().push(node.id);
            }
            store.by_id.insert(node.id, store.nodes.len());
            store.nodes.push(node);
        }
        store
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.by_id.get(&id).map(|&idx| &self.nodes[idx])
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Returns the level of a node, if known.
    pub fn level_of(&self, id: NodeId) -> Option<Level> {
        self.get(id).map(|node| node.level)
    }

    /// Returns the ids of the direct children of `id`.
    ///
    /// Unknown ids and leaves yield an empty slice.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the direct children of `id` as nodes.
    pub fn child_nodes(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.children(id).iter().filter_map(|child| self.get(*child))
    }

    /// Iterates over the level-1 nodes.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.at_level(Level::ROOT)
    }

    /// Iterates over all nodes at the given level, in snapshot order.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.level == level)
    }

    /// Iterates over all nodes in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest level present in the snapshot.
    pub fn max_level(&self) -> Option<Level> {
        self.nodes.iter().map(|node| node.level).max()
    }

    /// Ids dropped because they were already present.
    pub fn duplicates(&self) -> &[NodeId] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NodeStore {
        let a = Node::root(1, "A");
        let b = Node::root(2, "B");
        let a1 = Node::child_of(&a, 10, "A1");
        let a2 = Node::child_of(&a, 11, "A2");
        let a1a = Node::child_of(&a1, 100, "A1a");
        NodeStore::from_nodes([a, b, a1, a2, a1a])
    }

    #[test]
    fn lookup_and_children() {
        let store = sample();
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(NodeId(10)).unwrap().name, "A1");
        assert_eq!(store.children(NodeId(1)), &[NodeId(10), NodeId(11)]);
        assert!(store.children(NodeId(100)).is_empty());
        assert!(store.children(NodeId(999)).is_empty());
    }

    #[test]
    fn roots_and_levels() {
        let store = sample();
        let roots: Vec<_> = store.roots().map(|n| n.id).collect();
        assert_eq!(roots, vec![NodeId(1), NodeId(2)]);
        let level2: Vec<_> = store
            .at_level(Level::new(2).unwrap())
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(level2, vec!["A1", "A2"]);
        assert_eq!(store.max_level(), Level::new(3));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let store = NodeStore::from_nodes([Node::root(1, "first"), Node::root(1, "second")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(NodeId(1)).unwrap().name, "first");
        assert_eq!(store.duplicates(), &[NodeId(1)]);
    }

    #[test]
    fn empty_store() {
        let store = NodeStore::default();
        assert!(store.is_empty());
        assert!(store.max_level().is_none());
        assert!(store.get(NodeId(1)).is_none());
    }
}
