//! Hierarchical selection and navigation engine for strata.
//!
//! strata works on a forest of nodes, each sitting at a fixed level (1 is the root) and
//! linked to a parent one level up. Three concerns are kept apart:
//!
//! - **Selection** is owned by the caller. [`SelectionReconciler`] turns a current selection
//!   and a toggled id into the next selection, keeping at most one id per level and every
//!   selected node's ancestors selected alongside it.
//! - **Navigation** is the drill path of [`NavigationController`]: which node's children are
//!   in view at each level. It never changes the selection.
//! - **Annotation** ([`FilterAnnotator`]) computes per-node render hints: search match,
//!   relevance, selection and child-of-active flags.
//!
//! [`Picker`] composes the three over one [`NodeStore`] snapshot.

#![warn(missing_docs)]

mod ancestors;
mod annotate;
mod check;
mod descendants;
mod error;
mod navigation;
mod node;
mod picker;
mod selection;
mod source;
mod store;

pub use ancestors::{AncestorChain, AncestorResolver};
pub use annotate::{
    Annotation, AnnotationContext, FilterAnnotator, SearchQuery, normalize_search,
};
pub use check::{NodeWarning, check_nodes};
pub use descendants::{DescendantCache, DescendantIndex};
pub use error::TreeError;
pub use navigation::{DEFAULT_DEPTH, NavigationController};
pub use node::{Level, Node, NodeId};
pub use picker::{
    ClickOutcome, Column, Mode, ParseModeError, Picker, PickerEvents, SilentEvents,
};
pub use selection::{
    Reconciliation, Selection, SelectionReconciler, SelectionViolation, ToggleKind,
};
pub use source::{JsonFileSource, NodeSource, StaticSource, parse_nodes};
pub use store::NodeStore;
