//! Drill-path state: which child subset is in view at each level.
//!
//! Navigation is independent of selection. It only decides which column of children is
//! revealed, and resetting it never touches a selection.

use tracing::trace;

use crate::node::{Level, Node, NodeId};

/// Default hierarchy depth.
pub const DEFAULT_DEPTH: u8 = 4;

/// Tracks one optional active id for every level that has children to drill into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    /// Active id per drillable level; index 0 is level 1.
    active: Vec<Option<NodeId>>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl NavigationController {
    /// Creates an empty path for a hierarchy `depth` levels deep.
    ///
    /// The deepest level has nothing beneath it, so `depth - 1` levels are tracked.
    pub fn new(depth: u8) -> Self {
        Self {
            active: vec![None; usize::from(depth.saturating_sub(1))],
        }
    }

    /// Depth of the hierarchy this path was built for.
    pub fn depth(&self) -> u8 {
        u8::try_from(self.active.len() + 1).unwrap_or(u8::MAX)
    }

    /// Slot index for `level`, or `None` if the level cannot be drilled into.
    fn slot(&self, level: Level) -> Option<usize> {
        let idx = usize::from(level.get()) - 1;
        (idx < self.active.len()).then_some(idx)
    }

    /// Returns the active id at `level`.
    pub fn active(&self, level: Level) -> Option<NodeId> {
        self.slot(level).and_then(|idx| self.active[idx])
    }

    /// Returns the active ids, one entry per drillable level starting at level 1.
    pub fn path(&self) -> &[Option<NodeId>] {
        &self.active
    }

    /// Returns the deepest active level and its id.
    pub fn deepest(&self) -> Option<(Level, NodeId)> {
        self.active
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, id)| Some((level_at(idx), (*id)?)))
    }

    /// Returns true if nothing is drilled into.
    pub fn is_empty(&self) -> bool {
        self.active.iter().all(Option::is_none)
    }

    /// Activates `id` at `level`, or collapses the level if `id` is already active there.
    ///
    /// Either way every deeper level is cleared. Levels that cannot be drilled into are
    /// ignored.
    pub fn set_active(&mut self, level: Level, id: NodeId) {
        let Some(idx) = self.slot(level) else {
            trace!(%level, %id, "level has no children to drill into");
            return;
        };
        if self.active[idx] == Some(id) {
            self.clear_slots(idx);
        } else {
            self.active[idx] = Some(id);
            self.clear_slots(idx + 1);
        }
    }

    /// Clears `level` and every deeper level.
    pub fn clear_from(&mut self, level: Level) {
        if let Some(idx) = self.slot(level) {
            self.clear_slots(idx);
        }
    }

    /// Clears the whole path.
    pub fn reset(&mut self) {
        self.clear_slots(0);
    }

    /// Handles a click in browse mode.
    ///
    /// Drillable nodes toggle their own level. Nodes at the deepest level have no children,
    /// so they toggle their parent instead, keeping their siblings in view.
    pub fn click(&mut self, node: &Node) {
        if self.slot(node.level).is_some() {
            self.set_active(node.level, node.id);
        } else if let (Some(parent_level), Some(parent)) = (node.level.parent(), node.parent_id) {
            self.set_active(parent_level, parent);
        }
    }

    /// Drills into a node after it was toggled in selection mode.
    ///
    /// Unlike [`Self::click`], this never collapses: clicking the active node again leaves
    /// the path as it is. Nodes at the deepest level reveal their parent's children.
    pub fn reveal(&mut self, node: &Node) {
        if let Some(idx) = self.slot(node.level) {
            if self.active[idx] != Some(node.id) {
                self.active[idx] = Some(node.id);
                self.clear_slots(idx + 1);
            }
        } else if let (Some(parent_level), Some(parent)) = (node.level.parent(), node.parent_id)
            && let Some(idx) = self.slot(parent_level)
        {
            self.active[idx] = Some(parent);
        }
    }

    /// Clears every slot from `idx` onwards.
    fn clear_slots(&mut self, idx: usize) {
        for slot in self.active.iter_mut().skip(idx) {
            *slot = None;
        }
    }
}

/// Level for a slot index.
fn level_at(idx: usize) -> Level {
    Level::new(u8::try_from(idx + 1).unwrap_or(u8::MAX)).unwrap_or(Level::ROOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn tracks_depth_minus_one_levels() {
        let nav = NavigationController::default();
        assert_eq!(nav.path().len(), 3);
        assert_eq!(nav.depth(), 4);
        assert!(nav.is_empty());
    }

    #[test]
    fn drill_resets_deeper_levels() {
        let mut nav = NavigationController::default();
        nav.set_active(lvl(1), NodeId(1));
        nav.set_active(lvl(2), NodeId(10));
        nav.set_active(lvl(3), NodeId(100));
        nav.set_active(lvl(1), NodeId(2));
        assert_eq!(nav.path(), &[Some(NodeId(2)), None, None]);
    }

    #[test]
    fn same_id_collapses() {
        let mut nav = NavigationController::default();
        nav.set_active(lvl(1), NodeId(1));
        nav.set_active(lvl(2), NodeId(10));
        nav.set_active(lvl(2), NodeId(10));
        assert_eq!(nav.path(), &[Some(NodeId(1)), None, None]);
        nav.set_active(lvl(1), NodeId(1));
        assert!(nav.is_empty());
    }

    #[test]
    fn deepest_level_is_not_drillable() {
        let mut nav = NavigationController::default();
        nav.set_active(lvl(4), NodeId(1000));
        assert!(nav.is_empty());
        assert!(nav.active(lvl(4)).is_none());
    }

    #[test]
    fn leaf_click_toggles_parent() {
        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let a1a = Node::child_of(&a1, 100, "A1a");
        let leaf = Node::child_of(&a1a, 1000, "leaf");

        let mut nav = NavigationController::default();
        nav.click(&leaf);
        assert_eq!(nav.active(lvl(3)), Some(NodeId(100)));
        nav.click(&leaf);
        assert!(nav.active(lvl(3)).is_none());
    }

    #[test]
    fn reveal_never_collapses() {
        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let mut nav = NavigationController::default();
        nav.reveal(&a);
        nav.reveal(&a1);
        nav.reveal(&a1);
        assert_eq!(nav.path(), &[Some(NodeId(1)), Some(NodeId(10)), None]);
        nav.reveal(&a);
        assert_eq!(nav.path(), &[Some(NodeId(1)), Some(NodeId(10)), None]);
    }

    #[test]
    fn reveal_leaf_shows_parent_children() {
        let a = Node::root(1, "A");
        let a1 = Node::child_of(&a, 10, "A1");
        let a1a = Node::child_of(&a1, 100, "A1a");
        let leaf = Node::child_of(&a1a, 1000, "leaf");
        let mut nav = NavigationController::default();
        nav.reveal(&leaf);
        nav.reveal(&leaf);
        assert_eq!(nav.active(lvl(3)), Some(NodeId(100)));
    }

    #[test]
    fn clear_and_reset() {
        let mut nav = NavigationController::default();
        nav.set_active(lvl(1), NodeId(1));
        nav.set_active(lvl(2), NodeId(10));
        nav.set_active(lvl(3), NodeId(100));
        nav.clear_from(lvl(2));
        assert_eq!(nav.path(), &[Some(NodeId(1)), None, None]);
        nav.reset();
        assert!(nav.is_empty());
    }

    #[test]
    fn deepest_active() {
        let mut nav = NavigationController::default();
        assert!(nav.deepest().is_none());
        nav.set_active(lvl(1), NodeId(1));
        nav.set_active(lvl(2), NodeId(10));
        assert_eq!(nav.deepest(), Some((lvl(2), NodeId(10))));
    }

    #[test]
    fn shallow_hierarchy() {
        let mut nav = NavigationController::new(2);
        nav.set_active(lvl(1), NodeId(1));
        nav.set_active(lvl(2), NodeId(10));
        assert_eq!(nav.path(), &[Some(NodeId(1))]);
    }
}
