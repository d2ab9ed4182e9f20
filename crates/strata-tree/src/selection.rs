//! Selection sets and the reconciliation algorithm that keeps them a single ancestor chain.
//!
//! A [`Selection`] is owned by the caller. The engine never stores one; it takes the current
//! value and returns the next. Two invariants hold on every value the reconciler produces:
//!
//! 1. At most one id per level.
//! 2. The selected ids, ordered by level, form one unbroken parent chain.
//!
//! Selecting a node pulls in its ancestors and evicts anything that conflicts with them at
//! the same or a shallower level, plus the node's own descendants. Deselecting a node drops
//! it and its descendants and leaves ancestors alone.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ancestors::AncestorResolver,
    descendants::DescendantIndex,
    node::{Level, Node, NodeId},
    store::NodeStore,
};

/// An ordered, duplicate-free set of selected node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct Selection {
    /// Selected ids in insertion order.
    ids: Vec<NodeId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the selected ids in order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Iterates over the selected ids.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Appends `id` unless it is already present. Returns true if it was added.
    fn insert(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns a copy without any id in `remove`.
    fn without(&self, remove: &HashSet<NodeId>) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .copied()
                .filter(|id| !remove.contains(id))
                .collect(),
        }
    }

    /// Returns the selected ids whose node sits at `level`.
    ///
    /// Ids that are not in the store have no known level and are never returned.
    pub fn at_level(&self, store: &NodeStore, level: Level) -> Vec<NodeId> {
        self.iter()
            .filter(|id| store.level_of(*id) == Some(level))
            .collect()
    }

    /// Groups the known selected ids by level.
    pub fn by_level(&self, store: &NodeStore) -> BTreeMap<Level, Vec<NodeId>> {
        let mut grouped: BTreeMap<Level, Vec<NodeId>> = BTreeMap::new();
        for id in self.iter() {
            if let Some(level) = store.level_of(id) {
                grouped.entry(level).or_default().push(id);
            }
        }
        grouped
    }

    /// Returns the selected node at the deepest level, if any.
    pub fn deepest<'s>(&self, store: &'s NodeStore) -> Option<&'s Node> {
        self.iter()
            .filter_map(|id| store.get(id))
            .max_by_key(|node| node.level)
    }

    /// Checks both selection invariants and reports every violation found.
    pub fn violations(&self, store: &NodeStore) -> Vec<SelectionViolation> {
        let grouped = self.by_level(store);
        let mut violations = Vec::new();

        for (level, ids) in &grouped {
            if ids.len() > 1 {
                violations.push(SelectionViolation::MultiplePerLevel {
                    level: *level,
                    ids: ids.clone(),
                });
            }
        }

        for (level, ids) in &grouped {
            let Some(parent_level) = level.parent() else {
                continue;
            };
            let Some(parents) = grouped.get(&parent_level) else {
                for id in ids {
                    violations.push(SelectionViolation::MissingLevel {
                        id: *id,
                        level: parent_level,
                    });
                }
                continue;
            };
            for id in ids {
                let parent_id = store.get(*id).and_then(|node| node.parent_id);
                if !parents.iter().any(|p| Some(*p) == parent_id) {
                    violations.push(SelectionViolation::BrokenChain {
                        id: *id,
                        selected_parents: parents.clone(),
                    });
                }
            }
        }

        violations
    }

    /// Returns true if the selection satisfies both invariants.
    pub fn is_consistent(&self, store: &NodeStore) -> bool {
        self.violations(store).is_empty()
    }
}

impl From<Vec<NodeId>> for Selection {
    fn from(ids: Vec<NodeId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Selection> for Vec<NodeId> {
    fn from(selection: Selection) -> Self {
        selection.ids
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.ids.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}

/// A way in which a selection breaks one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionViolation {
    /// More than one id is selected at a level.
    MultiplePerLevel {
        /// The level holding several ids.
        level: Level,
        /// The ids selected there.
        ids: Vec<NodeId>,
    },
    /// A selected node's parent is not the id selected one level up.
    BrokenChain {
        /// The selected node.
        id: NodeId,
        /// What is selected at the parent level instead.
        selected_parents: Vec<NodeId>,
    },
    /// A selected node has nothing selected at the level above it.
    MissingLevel {
        /// The selected node.
        id: NodeId,
        /// The level with no selection.
        level: Level,
    },
}

impl fmt::Display for SelectionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiplePerLevel { level, ids } => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "level {level} has {} selections: {}", ids.len(), ids.join(", "))
            }
            Self::BrokenChain { id, .. } => {
                write!(f, "node {id} is not a child of the selection one level up")
            }
            Self::MissingLevel { id, level } => {
                write!(f, "node {id} is selected but nothing is selected at level {level}")
            }
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleKind {
    /// The node was added, along with its ancestors.
    Selected,
    /// The node and its descendants were removed.
    Deselected,
    /// Nothing changed: the id is unknown, or the explicit operation was already satisfied.
    Unchanged,
}

/// The outcome of one reconciliation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The selection to hand back to the caller.
    pub next: Selection,
    /// What kind of change happened.
    pub kind: ToggleKind,
    /// Ids present before and absent after, in their previous order.
    pub removed: Vec<NodeId>,
    /// Ids absent before and present after, in their new order.
    pub added: Vec<NodeId>,
}

impl Reconciliation {
    /// A result that leaves `current` untouched.
    fn unchanged(current: &Selection) -> Self {
        Self {
            next: current.clone(),
            kind: ToggleKind::Unchanged,
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    /// Builds a result by diffing `current` against `next`.
    fn diff(current: &Selection, next: Selection, kind: ToggleKind) -> Self {
        let removed = current.iter().filter(|id| !next.contains(*id)).collect();
        let added = next.iter().filter(|id| !current.contains(*id)).collect();
        Self {
            next,
            kind,
            removed,
            added,
        }
    }
}

/// Computes the next selection from the current one and a toggled node.
#[derive(Debug, Clone, Copy)]
pub struct SelectionReconciler<'a> {
    /// The snapshot nodes are resolved against.
    store: &'a NodeStore,
    /// Descendant lists for that snapshot.
    descendants: &'a DescendantIndex,
}

impl<'a> SelectionReconciler<'a> {
    /// Creates a reconciler over a snapshot and its descendant index.
    pub fn new(store: &'a NodeStore, descendants: &'a DescendantIndex) -> Self {
        Self { store, descendants }
    }

    /// Toggles `toggled` and returns the resulting selection.
    ///
    /// Ids absent from the store leave the selection unchanged.
    pub fn compute_next_selection(&self, current: &Selection, toggled: NodeId) -> Selection {
        self.reconcile(current, toggled).next
    }

    /// Toggles `toggled`, reporting what changed.
    pub fn reconcile(&self, current: &Selection, toggled: NodeId) -> Reconciliation {
        let Some(node) = self.store.get(toggled) else {
            debug!(id = %toggled, "toggled id not in snapshot, selection unchanged");
            return Reconciliation::unchanged(current);
        };
        let result = if current.contains(node.id) {
            self.deselect_node(current, node)
        } else {
            self.select_node(current, node)
        };
        debug!(
            id = %node.id,
            kind = ?result.kind,
            removed = result.removed.len(),
            added = result.added.len(),
            "reconciled selection"
        );
        result
    }

    /// Selects `id` if it is not already selected.
    pub fn select(&self, current: &Selection, id: NodeId) -> Reconciliation {
        match self.store.get(id) {
            Some(node) if !current.contains(id) => self.select_node(current, node),
            _ => Reconciliation::unchanged(current),
        }
    }

    /// Deselects `id` if it is currently selected.
    pub fn deselect(&self, current: &Selection, id: NodeId) -> Reconciliation {
        match self.store.get(id) {
            Some(node) if current.contains(id) => self.deselect_node(current, node),
            _ => Reconciliation::unchanged(current),
        }
    }

    /// Removes `node` and all of its descendants.
    fn deselect_node(&self, current: &Selection, node: &Node) -> Reconciliation {
        let mut to_remove = HashSet::new();
        self.purge(node.id, &mut to_remove);
        Reconciliation::diff(current, current.without(&to_remove), ToggleKind::Deselected)
    }

    /// Adds `node` and its ancestor chain, evicting everything that conflicts with them.
    fn select_node(&self, current: &Selection, node: &Node) -> Reconciliation {
        let ancestry = AncestorResolver::new(self.store).resolve(node);
        let mut to_remove = HashSet::new();

        // Whatever holds this node's level goes, along with everything beneath it.
        for id in current.at_level(self.store, node.level) {
            if id != node.id {
                self.purge(id, &mut to_remove);
            }
        }

        // At each shallower level, only the node's own ancestor may stay. Levels missing
        // from a truncated chain are not constrained.
        for level in node.level.ancestors() {
            let Some(correct) = ancestry.at(level) else {
                continue;
            };
            for id in current.at_level(self.store, level) {
                if id != correct {
                    self.purge(id, &mut to_remove);
                }
            }
        }

        to_remove.extend(self.descendants.descendants(node.id));

        let mut next = current.without(&to_remove);
        for id in ancestry.root_first() {
            next.insert(id);
        }
        next.insert(node.id);

        for (level, id) in &ancestry.by_level {
            if next.insert(*id) {
                debug!(%level, id = %id, "restored missing ancestor after reconciliation");
            }
        }

        Reconciliation::diff(current, next, ToggleKind::Selected)
    }

    /// Marks `id` and all its descendants for removal.
    fn purge(&self, id: NodeId, to_remove: &mut HashSet<NodeId>) {
        to_remove.insert(id);
        to_remove.extend(self.descendants.descendants(id));
    }
}
