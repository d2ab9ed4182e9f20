//! Render hints for the nodes of one level.
//!
//! Annotation is read-only. `is_relevant` only drives emphasis; a dimmed node stays fully
//! clickable. The search match is the one predicate that hides a node.

use std::cmp::Reverse;

use serde::Serialize;

use crate::{
    ancestors::AncestorResolver,
    descendants::DescendantIndex,
    navigation::NavigationController,
    node::{Node, NodeId},
    picker::Mode,
    selection::Selection,
    store::NodeStore,
};

/// Lowercases `text` and drops everything that is not alphanumeric.
pub fn normalize_search(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A normalized search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Normalized query text; empty matches everything.
    normalized: String,
}

impl SearchQuery {
    /// Normalizes `text`. Queries shorter than `min_length` after normalization match
    /// everything.
    pub fn new(text: &str, min_length: usize) -> Self {
        let normalized = normalize_search(text);
        if normalized.chars().count() < min_length {
            return Self::default();
        }
        Self { normalized }
    }

    /// Returns true if the query filters nothing.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Substring test against the node's normalized name or its id.
    pub fn matches(&self, node: &Node) -> bool {
        self.is_empty()
            || normalize_search(&node.name).contains(&self.normalized)
            || node.id.to_string().contains(&self.normalized)
    }
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        Self::new(text, 0)
    }
}

/// Everything besides the search text that shapes annotations.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationContext<'a> {
    /// Whether clicks select or only navigate; decides how relevance is computed.
    pub mode: Mode,
    /// The current drill path.
    pub navigation: &'a NavigationController,
    /// The caller's selection.
    pub selection: &'a Selection,
}

/// Render hints for a single node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation<'a> {
    /// The annotated node.
    pub node: &'a Node,
    /// Whether the node passes the search filter.
    pub matches_search: bool,
    /// Advisory emphasis; irrelevant nodes are dimmed, not removed.
    pub is_relevant: bool,
    /// Whether the node is in the selection.
    pub is_selected: bool,
    /// Whether the node is a child of the active node one level up.
    pub is_child: bool,
}

/// Computes annotations against one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FilterAnnotator<'a> {
    /// Snapshot used for ancestor walks.
    store: &'a NodeStore,
    /// Descendant lists for the snapshot.
    descendants: &'a DescendantIndex,
}

impl<'a> FilterAnnotator<'a> {
    /// Creates an annotator over a snapshot and its descendant index.
    pub fn new(store: &'a NodeStore, descendants: &'a DescendantIndex) -> Self {
        Self { store, descendants }
    }

    /// Annotates `nodes` (normally all nodes of one level) and orders them for display.
    ///
    /// Children of the active parent come first, then relevant nodes, then the rest; ties
    /// are broken by case-insensitive name and then id. Every input node is returned.
    pub fn annotate<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n Node>,
        search: &SearchQuery,
        ctx: &AnnotationContext<'_>,
    ) -> Vec<Annotation<'n>> {
        let mut annotations: Vec<Annotation<'n>> = nodes
            .into_iter()
            .map(|node| Annotation {
                node,
                matches_search: search.matches(node),
                is_relevant: match ctx.mode {
                    Mode::Browse => self.browse_relevant(node, ctx.navigation),
                    Mode::Selection => self.selection_relevant(node, ctx.selection),
                },
                is_selected: ctx.selection.contains(node.id),
                is_child: is_child_of_active(node, ctx.navigation),
            })
            .collect();

        annotations.sort_by_cached_key(|a| {
            (
                Reverse(a.is_child),
                Reverse(a.is_relevant),
                a.node.name.to_lowercase(),
                a.node.id,
            )
        });
        annotations
    }

    /// Browse-mode relevance, derived from the drill path alone.
    fn browse_relevant(&self, node: &Node, nav: &NavigationController) -> bool {
        if let Some(parent_level) = node.level.parent()
            && let Some(active_parent) = nav.active(parent_level)
        {
            return node.parent_id == Some(active_parent);
        }

        if let Some((level, deepest)) = nav.deepest()
            && level > node.level
        {
            return AncestorResolver::new(self.store).is_ancestor(node.id, deepest);
        }

        // The column holds an active node of its own, so it is part of the drill path.
        if nav.active(node.level).is_some() {
            return true;
        }

        // Drilled somewhere above the parent level: this column is out of context.
        !nav.path()
            .iter()
            .take(usize::from(node.level.get()).saturating_sub(2))
            .any(Option::is_some)
    }

    /// Selection-mode relevance: on the path of, or beneath, something selected.
    fn selection_relevant(&self, node: &Node, selection: &Selection) -> bool {
        if selection.is_empty() || selection.contains(node.id) {
            return true;
        }
        let resolver = AncestorResolver::new(self.store);
        selection.iter().any(|selected: NodeId| {
            resolver.is_ancestor(node.id, selected)
                || self.descendants.is_descendant(selected, node.id)
        })
    }
}

/// True if the node's parent is the active node one level up.
fn is_child_of_active(node: &Node, nav: &NavigationController) -> bool {
    node.level
        .parent()
        .and_then(|level| nav.active(level))
        .is_some_and(|active| node.parent_id == Some(active))
}
