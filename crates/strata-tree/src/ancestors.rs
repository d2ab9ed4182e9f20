//! Parent-link walks from a node up to its root.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::{
    node::{Level, Node, NodeId},
    store::NodeStore,
};

/// The resolved ancestry of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorChain {
    /// Ancestor ids ordered from the nearest parent up to the root.
    pub chain: Vec<NodeId>,
    /// Each ancestor keyed by its own level.
    pub by_level: BTreeMap<Level, NodeId>,
    /// True if the walk stopped at a parent id missing from the store.
    pub truncated: bool,
}

impl AncestorChain {
    /// Returns the ancestor recorded at `level`.
    pub fn at(&self, level: Level) -> Option<NodeId> {
        self.by_level.get(&level).copied()
    }

    /// Returns true if `id` is one of the ancestors.
    pub fn contains(&self, id: NodeId) -> bool {
        self.chain.contains(&id)
    }

    /// Iterates over the ancestors from the root down to the nearest parent.
    pub fn root_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.chain.iter().rev().copied()
    }
}

/// Resolves ancestor chains against a [`NodeStore`].
#[derive(Debug, Clone, Copy)]
pub struct AncestorResolver<'a> {
    /// The snapshot to walk.
    store: &'a NodeStore,
}

impl<'a> AncestorResolver<'a> {
    /// Creates a resolver over a snapshot.
    pub fn new(store: &'a NodeStore) -> Self {
        Self { store }
    }

    /// Walks `parent_id` links from `node` until a root is reached or no parent remains.
    ///
    /// A parent id that is not in the store ends the walk early and yields a partial
    /// chain. This never fails.
    pub fn resolve(&self, node: &Node) -> AncestorChain {
        let mut result = AncestorChain::default();
        let mut seen = HashSet::from([node.id]);
        let mut current = node;

        while !current.level.is_root() {
            let Some(parent_id) = current.parent_id else {
                break;
            };
            let Some(parent) = self.store.get(parent_id) else {
                warn!(node = %current.id, parent = %parent_id, "parent not found, ancestor chain truncated");
                result.truncated = true;
                break;
            };
            if !seen.insert(parent.id) {
                warn!(node = %node.id, "cycle in parent links, ancestor chain truncated");
                result.truncated = true;
                break;
            }
            result.chain.push(parent.id);
            result.by_level.insert(parent.level, parent.id);
            current = parent;
        }

        result
    }

    /// Resolves the chain for an id; unknown ids get an empty chain.
    pub fn resolve_id(&self, id: NodeId) -> AncestorChain {
        self.store
            .get(id)
            .map(|node| self.resolve(node))
            .unwrap_or_default()
    }

    /// Returns true if `ancestor` is on the parent chain of `descendant`.
    pub fn is_ancestor(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.resolve_id(descendant).contains(ancestor)
    }

    /// Returns the names along the path from the root to `node`, inclusive.
    pub fn breadcrumb(&self, node: &Node) -> Vec<&'a str> {
        let chain = self.resolve(node);
        let mut names: Vec<&'a str> = chain
            .root_first()
            .filter_map(|id| self.store.get(id))
            .map(|n| n.name.as_str())
            .collect();
        if let Some(own) = self.store.get(node.id) {
            names.push(own.name.as_str());
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn sample() -> NodeStore {
        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let a1a = Node::child_of(&a1, 100, "A1a");
        let a1a_x = Node::child_of(&a1a, 1000, "A1a-x");
        NodeStore::from_nodes([a, a1, a1a, a1a_x])
    }

    #[test]
    fn full_chain_nearest_first() {
        let store = sample();
        let resolver = AncestorResolver::new(&store);
        let chain = resolver.resolve_id(NodeId(1000));
        assert_eq!(chain.chain, vec![NodeId(100), NodeId(10), NodeId(1)]);
        assert_eq!(chain.at(lvl(1)), Some(NodeId(1)));
        assert_eq!(chain.at(lvl(2)), Some(NodeId(10)));
        assert_eq!(chain.at(lvl(3)), Some(NodeId(100)));
        assert!(!chain.truncated);
    }

    #[test]
    fn root_has_empty_chain() {
        let store = sample();
        let chain = AncestorResolver::new(&store).resolve_id(NodeId(1));
        assert!(chain.chain.is_empty());
        assert!(chain.by_level.is_empty());
    }

    #[test]
    fn missing_parent_truncates() {
        let a = Node::root(1, "A");
        let orphan_parent = Node {
            id: NodeId(20),
            level: lvl(2),
            name: "lost".into(),
            parent_id: Some(NodeId(999)),
        };
        let child = Node::child_of(&orphan_parent, 200, "child");
        let store = NodeStore::from_nodes([a, orphan_parent, child]);
        let chain = AncestorResolver::new(&store).resolve_id(NodeId(200));
        assert_eq!(chain.chain, vec![NodeId(20)]);
        assert!(chain.at(lvl(1)).is_none());
        assert!(chain.truncated);
    }

    #[test]
    fn unknown_id_has_empty_chain() {
        let store = sample();
        assert_eq!(
            AncestorResolver::new(&store).resolve_id(NodeId(5)),
            AncestorChain::default()
        );
    }

    #[test]
    fn ancestor_checks() {
        let store = sample();
        let resolver = AncestorResolver::new(&store);
        assert!(resolver.is_ancestor(NodeId(1), NodeId(1000)));
        assert!(resolver.is_ancestor(NodeId(100), NodeId(1000)));
        assert!(!resolver.is_ancestor(NodeId(1000), NodeId(1)));
        assert!(!resolver.is_ancestor(NodeId(10), NodeId(10)));
    }

    #[test]
    fn breadcrumb_root_to_node() {
        let store = sample();
        let resolver = AncestorResolver::new(&store);
        let node = store.get(NodeId(100)).unwrap();
        assert_eq!(resolver.breadcrumb(node), vec!["A", "A1", "A1a"]);
    }

    #[test]
    fn cyclic_links_terminate() {
        let x = Node {
            id: NodeId(1),
            level: lvl(2),
            name: "X".into(),
            parent_id: Some(NodeId(2)),
        };
        let y = Node {
            id: NodeId(2),
            level: lvl(3),
            name: "Y".into(),
            parent_id: Some(NodeId(1)),
        };
        let store = NodeStore::from_nodes([x, y]);
        let chain = AncestorResolver::new(&store).resolve_id(NodeId(1));
        assert_eq!(chain.chain, vec![NodeId(2)]);
        assert!(chain.truncated);
    }
}
