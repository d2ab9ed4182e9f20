//! The picker: one snapshot, a drill path, a search, and the callbacks a host listens to.
//!
//! The picker owns navigation and search state but never the selection. Hosts pass the
//! current selection into every call and receive the next one through
//! [`PickerEvents::on_selection_change`].

use std::{cell::RefCell, fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    annotate::{Annotation, AnnotationContext, FilterAnnotator, SearchQuery},
    descendants::{DescendantCache, DescendantIndex},
    navigation::NavigationController,
    node::{Level, Node, NodeId},
    selection::{Reconciliation, Selection, SelectionReconciler},
    store::NodeStore,
};

/// Whether clicks change the selection or only move the drill path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Clicks toggle nodes in the selection.
    #[default]
    Selection,
    /// Clicks only navigate; the selection is read-only.
    Browse,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Selection => "selection",
            Self::Browse => "browse",
        })
    }
}

/// Error returned when a mode name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mode '{0}': expected 'selection' or 'browse'")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection" | "select" => Ok(Self::Selection),
            "browse" => Ok(Self::Browse),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Callbacks fired by the picker.
pub trait PickerEvents {
    /// Called with the next selection after a toggle.
    fn on_selection_change(&mut self, next: &Selection);

    /// Called when the host should show details for a node.
    fn on_open_detail(&mut self, node: &Node);
}

/// A [`PickerEvents`] implementation that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentEvents;

impl PickerEvents for SilentEvents {
    fn on_selection_change(&mut self, _next: &Selection) {}

    fn on_open_detail(&mut self, _node: &Node) {}
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Selection mode: the selection was reconciled.
    Reconciled(Reconciliation),
    /// Browse mode: only the drill path moved.
    Navigated,
    /// The id is not in the snapshot.
    Ignored,
}

/// One level's worth of annotated nodes.
#[derive(Debug, Clone, Serialize)]
pub struct Column<'a> {
    /// The level shown.
    pub level: Level,
    /// Nodes that pass the search filter, in display order.
    pub entries: Vec<Annotation<'a>>,
    /// How many nodes the search filter hid.
    pub hidden: usize,
}

/// Ties a snapshot to navigation, search, and selection reconciliation.
#[derive(Debug)]
pub struct Picker {
    /// The current snapshot.
    store: Arc<NodeStore>,
    /// Descendant index for the current snapshot.
    cache: RefCell<DescendantCache>,
    /// The drill path.
    navigation: NavigationController,
    /// Click behaviour.
    mode: Mode,
    /// The active search filter.
    search: SearchQuery,
    /// Minimum normalized length before a search filters anything.
    min_search_length: usize,
    /// Number of levels shown.
    depth: u8,
}

impl Picker {
    /// Creates a picker over `store` showing `depth` levels.
    pub fn new(store: Arc<NodeStore>, mode: Mode, depth: u8) -> Self {
        Self {
            store,
            cache: RefCell::new(DescendantCache::new()),
            navigation: NavigationController::new(depth),
            mode,
            search: SearchQuery::default(),
            min_search_length: 0,
            depth,
        }
    }

    /// Sets the minimum normalized search length.
    pub fn with_min_search_length(mut self, min_length: usize) -> Self {
        self.min_search_length = min_length;
        self
    }

    /// The current snapshot.
    pub fn store(&self) -> &Arc<NodeStore> {
        &self.store
    }

    /// The click behaviour.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Changes the click behaviour. The drill path is kept.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// The drill path.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// The active search filter.
    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, text: &str) {
        self.search = SearchQuery::new(text, self.min_search_length);
    }

    /// Swaps in a new snapshot. The descendant index is rebuilt on next use.
    ///
    /// The drill path is kept; ids that vanished simply stop matching anything.
    pub fn refresh(&mut self, store: Arc<NodeStore>) {
        debug!(nodes = store.len(), "refreshing picker snapshot");
        self.store = store;
    }

    /// Clears the drill path. The selection is not touched.
    pub fn reset_navigation(&mut self) {
        self.navigation.reset();
    }

    /// Clears the drill path at `level` and below.
    pub fn clear_navigation_from(&mut self, level: Level) {
        self.navigation.clear_from(level);
    }

    /// Descendant index for the current snapshot.
    pub fn descendants(&self) -> Arc<DescendantIndex> {
        self.cache.borrow_mut().get(&self.store)
    }

    /// Handles a click on `id`.
    ///
    /// In selection mode the selection is toggled, the host is told about the next
    /// selection, and the drill path moves to reveal the node's children. In browse mode
    /// only the drill path moves.
    pub fn click(
        &mut self,
        selection: &Selection,
        id: NodeId,
        events: &mut impl PickerEvents,
    ) -> ClickOutcome {
        let Some(node) = self.store.get(id).cloned() else {
            debug!(%id, "click on unknown id ignored");
            return ClickOutcome::Ignored;
        };

        match self.mode {
            Mode::Browse => {
                self.navigation.click(&node);
                ClickOutcome::Navigated
            }
            Mode::Selection => {
                let index = self.descendants();
                let result = SelectionReconciler::new(&self.store, &index).reconcile(selection, id);
                events.on_selection_change(&result.next);
                self.navigation.reveal(&node);
                ClickOutcome::Reconciled(result)
            }
        }
    }

    /// Drills to `id` without collapsing or touching the selection.
    ///
    /// Returns false if the id is not in the snapshot.
    pub fn reveal(&mut self, id: NodeId) -> bool {
        let Some(node) = self.store.get(id) else {
            return false;
        };
        self.navigation.reveal(node);
        true
    }

    /// Asks the host to show details for `id`. Neither selection nor navigation changes.
    ///
    /// Returns false if the id is not in the snapshot.
    pub fn open_detail(&self, id: NodeId, events: &mut impl PickerEvents) -> bool {
        match self.store.get(id) {
            Some(node) => {
                events.on_open_detail(node);
                true
            }
            None => false,
        }
    }

    /// Annotates every level for display.
    pub fn columns(&self, selection: &Selection) -> Vec<Column<'_>> {
        let index = self.descendants();
        let annotator = FilterAnnotator::new(&self.store, &index);
        let ctx = AnnotationContext {
            mode: self.mode,
            navigation: &self.navigation,
            selection,
        };

        Level::up_to(self.depth)
            .map(|level| {
                let annotated = annotator.annotate(self.store.at_level(level), &self.search, &ctx);
                let total = annotated.len();
                let entries: Vec<Annotation<'_>> =
                    annotated.into_iter().filter(|a| a.matches_search).collect();
                Column {
                    level,
                    hidden: total - entries.len(),
                    entries,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback.
    #[derive(Default)]
    struct Recorder {
        /// Selections handed over, in order.
        changes: Vec<Selection>,
        /// Nodes whose details were requested.
        opened: Vec<NodeId>,
    }

    impl PickerEvents for Recorder {
        fn on_selection_change(&mut self, next: &Selection) {
            self.changes.push(next.clone());
        }

        fn on_open_detail(&mut self, node: &Node) {
            self.opened.push(node.id);
        }
    }

    fn lvl(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn store() -> Arc<NodeStore> {
        let a = Node::root(1, "A");
        let b = Node::root(2, "B");
        let a1 = Node::child_of(&a, 10, "A1");
        let b1 = Node::child_of(&b, 20, "B1");
        let a1a = Node::child_of(&a1, 100, "A1a");
        let leaf = Node::child_of(&a1a, 1000, "Leaf");
        Arc::new(NodeStore::from_nodes([a, b, a1, b1, a1a, leaf]))
    }

    #[test]
    fn mode_parses() {
        assert_eq!("browse".parse::<Mode>().unwrap(), Mode::Browse);
        assert_eq!(" Selection ".parse::<Mode>().unwrap(), Mode::Selection);
        assert!("edit".parse::<Mode>().is_err());
        assert_eq!(Mode::Browse.to_string(), "browse");
    }

    #[test]
    fn selection_click_reports_and_reveals() {
        let mut picker = Picker::new(store(), Mode::Selection, 4);
        let mut events = Recorder::default();

        let outcome = picker.click(&Selection::new(), NodeId(100), &mut events);
        let ClickOutcome::Reconciled(result) = outcome else {
            panic!("expected reconciliation");
        };
        assert_eq!(result.next.ids(), &[NodeId(1), NodeId(10), NodeId(100)]);
        assert_eq!(events.changes, vec![result.next.clone()]);
        assert_eq!(picker.navigation().active(lvl(3)), Some(NodeId(100)));

        // Toggling again deselects but leaves the drill path in place.
        picker.click(&result.next, NodeId(100), &mut events);
        assert_eq!(events.changes[1].ids(), &[NodeId(1), NodeId(10)]);
        assert_eq!(picker.navigation().active(lvl(3)), Some(NodeId(100)));
    }

    #[test]
    fn browse_click_only_navigates() {
        let mut picker = Picker::new(store(), Mode::Browse, 4);
        let mut events = Recorder::default();
        let outcome = picker.click(&Selection::new(), NodeId(1), &mut events);
        assert_eq!(outcome, ClickOutcome::Navigated);
        assert!(events.changes.is_empty());
        assert_eq!(picker.navigation().active(lvl(1)), Some(NodeId(1)));

        picker.click(&Selection::new(), NodeId(1), &mut events);
        assert!(picker.navigation().is_empty());
    }

    #[test]
    fn reveal_drills_without_collapsing() {
        let mut picker = Picker::new(store(), Mode::Browse, 4);
        assert!(picker.reveal(NodeId(1)));
        assert!(picker.reveal(NodeId(10)));
        assert!(picker.reveal(NodeId(10)));
        assert_eq!(
            picker.navigation().path(),
            &[Some(NodeId(1)), Some(NodeId(10)), None]
        );
        assert!(!picker.reveal(NodeId(999)));
    }

    #[test]
    fn unknown_click_is_ignored() {
        let mut picker = Picker::new(store(), Mode::Selection, 4);
        let mut events = Recorder::default();
        assert_eq!(
            picker.click(&Selection::new(), NodeId(999), &mut events),
            ClickOutcome::Ignored
        );
        assert!(events.changes.is_empty());
    }

    #[test]
    fn open_detail_touches_nothing() {
        let mut picker = Picker::new(store(), Mode::Selection, 4);
        picker.click(&Selection::new(), NodeId(1), &mut SilentEvents);
        let before = picker.navigation().clone();

        let mut events = Recorder::default();
        assert!(picker.open_detail(NodeId(10), &mut events));
        assert!(!picker.open_detail(NodeId(999), &mut events));
        assert_eq!(events.opened, vec![NodeId(10)]);
        assert!(events.changes.is_empty());
        assert_eq!(picker.navigation(), &before);
    }

    #[test]
    fn columns_filter_by_search() {
        let mut picker = Picker::new(store(), Mode::Selection, 4).with_min_search_length(2);
        let selection = Selection::new();

        let columns = picker.columns(&selection);
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].entries.len(), 2);
        assert_eq!(columns[0].hidden, 0);

        picker.set_search("a1");
        let columns = picker.columns(&selection);
        assert!(columns[0].entries.is_empty());
        assert_eq!(columns[0].hidden, 2);
        assert_eq!(columns[1].entries.len(), 1);
        assert_eq!(columns[2].entries.len(), 1);

        // Below the minimum length nothing is filtered.
        picker.set_search("a");
        assert_eq!(picker.columns(&selection)[0].hidden, 0);
    }

    #[test]
    fn refresh_rebuilds_index() {
        let mut picker = Picker::new(store(), Mode::Selection, 4);
        let first = picker.descendants();
        assert!(Arc::ptr_eq(&first, &picker.descendants()));

        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let a2 = Node::child_of(&a, 11, "A2");
        picker.refresh(Arc::new(NodeStore::from_nodes([a, a1, a2])));
        let second = picker.descendants();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.descendants(NodeId(1)), &[NodeId(10), NodeId(11)]);
    }

    #[test]
    fn reset_navigation_keeps_selection() {
        let mut picker = Picker::new(store(), Mode::Selection, 4);
        let mut events = Recorder::default();
        let outcome = picker.click(&Selection::new(), NodeId(1), &mut events);
        let ClickOutcome::Reconciled(first) = outcome else {
            panic!("expected reconciliation");
        };
        let outcome = picker.click(&first.next, NodeId(10), &mut events);
        let ClickOutcome::Reconciled(result) = outcome else {
            panic!("expected reconciliation");
        };
        assert_eq!(picker.navigation().active(lvl(2)), Some(NodeId(10)));
        picker.clear_navigation_from(lvl(2));
        assert_eq!(picker.navigation().active(lvl(1)), Some(NodeId(1)));
        assert!(picker.navigation().active(lvl(2)).is_none());

        picker.reset_navigation();
        assert!(picker.navigation().is_empty());
        assert_eq!(result.next.ids(), &[NodeId(1), NodeId(10)]);
        assert_eq!(events.changes.len(), 2);
    }
}
