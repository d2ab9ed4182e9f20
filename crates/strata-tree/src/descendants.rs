//! Memoized map from each node to everything transitively beneath it.

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{node::NodeId, store::NodeStore};

/// Precomputed transitive descendants for every node in a [`NodeStore`].
///
/// Nodes are laid out once in depth-first pre-order, so each node's descendants form one
/// contiguous run right after it. A list holds the first child, that child's subtree, then
/// the next child, and so on.
#[derive(Debug, Clone, Default)]
pub struct DescendantIndex {
    /// Every node in depth-first pre-order.
    order: Vec<NodeId>,
    /// Node id to the run of `order` holding its descendants.
    spans: HashMap<NodeId, Range<usize>>,
}

impl DescendantIndex {
    /// Builds the index with an explicit-stack depth-first walk.
    ///
    /// Walks start at nodes whose parent is absent or unknown. Nodes left over after that
    /// hang off a parent-link cycle; each starts a walk of its own, and a link back onto an
    /// already visited node is ignored. Work and memory are linear in the snapshot size,
    /// however deep the parent links go.
    pub fn build(store: &NodeStore) -> Self {
        let mut index = Self {
            order: Vec::with_capacity(store.len()),
            spans: HashMap::with_capacity(store.len()),
        };
        let mut visited = HashSet::with_capacity(store.len());

        let tops = store
            .iter()
            .filter(|node| node.parent_id.is_none_or(|parent| !store.contains(parent)));
        for node in tops {
            index.walk(store, node.id, &mut visited);
        }
        for node in store.iter() {
            if !visited.contains(&node.id) {
                warn!(id = %node.id, "node sits on a parent-link cycle");
                index.walk(store, node.id, &mut visited);
            }
        }
        index
    }

    /// Appends `start` and everything reachable below it that is not yet visited.
    fn walk(&mut self, store: &NodeStore, start: NodeId, visited: &mut HashSet<NodeId>) {
        visited.insert(start);
        self.order.push(start);
        let mut stack = vec![Frame::new(start, self.order.len())];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = store.children(frame.id).get(frame.cursor) else {
                let (id, begin) = (frame.id, frame.begin);
                self.spans.insert(id, begin..self.order.len());
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let parent = frame.id;
            if !visited.insert(child) {
                warn!(parent = %parent, child = %child, "cycle in parent links, skipping back edge");
                continue;
            }
            self.order.push(child);
            stack.push(Frame::new(child, self.order.len()));
        }
    }

    /// Returns every descendant of `id`; empty for leaves and unknown ids.
    pub fn descendants(&self, id: NodeId) -> &[NodeId] {
        self.spans
            .get(&id)
            .and_then(|span| self.order.get(span.clone()))
            .unwrap_or(&[])
    }

    /// Returns true if `candidate` sits somewhere beneath `ancestor`.
    pub fn is_descendant(&self, ancestor: NodeId, candidate: NodeId) -> bool {
        match (self.spans.get(&ancestor), self.spans.get(&candidate)) {
            // A node sits in `order` just before its own span.
            (Some(outer), Some(inner)) => outer.contains(&(inner.start - 1)),
            _ => false,
        }
    }

    /// Number of nodes with an entry.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// One node on the walk stack.
struct Frame {
    /// The node being expanded.
    id: NodeId,
    /// Position in `order` where its descendants begin.
    begin: usize,
    /// Index of the next child to visit.
    cursor: usize,
}

impl Frame {
    /// A frame for `id` whose descendants start at `begin`.
    fn new(id: NodeId, begin: usize) -> Self {
        Self {
            id,
            begin,
            cursor: 0,
        }
    }
}

/// Caches a [`DescendantIndex`] keyed on the identity of the snapshot it was built from.
///
/// Repeated lookups with the same `Arc<NodeStore>` return the cached index; handing in a
/// different snapshot rebuilds it. Identity is pointer identity, not structural equality.
#[derive(Debug, Default)]
pub struct DescendantCache {
    /// The snapshot the cached index belongs to, and the index itself.
    cached: Option<(Arc<NodeStore>, Arc<DescendantIndex>)>,
}

impl DescendantCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `store`, building it if the snapshot changed.
    pub fn get(&mut self, store: &Arc<NodeStore>) -> Arc<DescendantIndex> {
        if let Some((cached_store, index)) = &self.cached
            && Arc::ptr_eq(cached_store, store)
        {
            return Arc::clone(index);
        }

        debug!(nodes = store.len(), "building descendant index");
        let index = Arc::new(DescendantIndex::build(store));
        self.cached = Some((Arc::clone(store), Arc::clone(&index)));
        index
    }
}
