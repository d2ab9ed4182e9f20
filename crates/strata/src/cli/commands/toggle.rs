//! Implementation of `strata toggle`.

use std::process::ExitCode;

use serde::Serialize;
use strata_tree::{ClickOutcome, Mode, Node, NodeId, PickerEvents, Selection, ToggleKind};

use crate::cli::{
    args::ToggleCommand,
    context::CommandContext,
    output::{dim, format_selection, print_json, subheader, success, warning},
};

/// Holds the selection on behalf of the picker, the way a host application would.
#[derive(Default)]
struct SelectionHost {
    /// The selection most recently reported by the picker.
    selection: Selection,
}

impl PickerEvents for SelectionHost {
    fn on_selection_change(&mut self, next: &Selection) {
        self.selection = next.clone();
    }

    fn on_open_detail(&mut self, _node: &Node) {}
}

/// One replayed toggle.
#[derive(Serialize)]
struct JsonStep {
    /// The id that was clicked.
    toggled: NodeId,
    /// What the click did.
    kind: ToggleKind,
    /// Selection after the click.
    selection: Selection,
    /// Ids that entered the selection.
    added: Vec<NodeId>,
    /// Ids that left the selection.
    removed: Vec<NodeId>,
}

/// JSON output for a replay.
#[derive(Serialize)]
struct JsonReplay<'a> {
    /// Selection before the first click.
    initial: &'a Selection,
    /// Every click in order.
    steps: &'a [JsonStep],
    /// Selection after the last click.
    selection: &'a Selection,
}

/// Replays toggles in selection mode, starting from `--selected`.
pub fn run(ctx: &CommandContext, cmd: &ToggleCommand) -> ExitCode {
    let store = match ctx.load_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let initial = Selection::from(cmd.selected.clone());
    let mut host = SelectionHost {
        selection: initial.clone(),
    };
    let mut picker = ctx.picker(store, Mode::Selection);

    let mut steps = Vec::with_capacity(cmd.ids.len());
    for &id in &cmd.ids {
        let current = host.selection.clone();
        let step = match picker.click(&current, id, &mut host) {
            ClickOutcome::Reconciled(r) => JsonStep {
                toggled: id,
                kind: r.kind,
                selection: r.next,
                added: r.added,
                removed: r.removed,
            },
            ClickOutcome::Navigated | ClickOutcome::Ignored => {
                eprintln!("warning: unknown node id {id}, selection unchanged");
                JsonStep {
                    toggled: id,
                    kind: ToggleKind::Unchanged,
                    selection: current,
                    added: Vec::new(),
                    removed: Vec::new(),
                }
            }
        };
        steps.push(step);
    }

    if cmd.json {
        return print_json(&JsonReplay {
            initial: &initial,
            steps: &steps,
            selection: &host.selection,
        });
    }

    let store = picker.store();
    println!(
        "{} {}",
        subheader("Initial:"),
        format_selection(&initial, store)
    );
    for step in &steps {
        let kind = match step.kind {
            ToggleKind::Selected => success("selected"),
            ToggleKind::Deselected => warning("deselected"),
            ToggleKind::Unchanged => dim("unchanged"),
        };
        println!();
        println!("{} {kind}", subheader(&format!("Toggle {}:", step.toggled)));
        println!("   {}", format_selection(&step.selection, store));
        if !step.added.is_empty() {
            println!("   {}", dim(&format!("+ {}", join_ids(&step.added))));
        }
        if !step.removed.is_empty() {
            println!("   {}", dim(&format!("- {}", join_ids(&step.removed))));
        }
    }
    println!();
    println!("{} {}", subheader("Selection:"), host.selection);

    ExitCode::SUCCESS
}

/// Joins ids with commas.
fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
