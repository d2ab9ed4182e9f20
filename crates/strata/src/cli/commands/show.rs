//! Implementation of `strata show`.

use std::process::ExitCode;

use strata_tree::Selection;

use crate::cli::{args::ShowCommand, context::CommandContext, output::output_picker};

/// Prints annotated columns for a given selection, drill path, and search.
pub fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let store = match ctx.load_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let selection: Selection = cmd.selected.iter().copied().collect();
    let mut picker = ctx.picker(store, ctx.config.picker.mode);
    if let Some(mode) = cmd.mode {
        picker.set_mode(mode);
    }

    for &id in &cmd.navigate {
        if !picker.reveal(id) {
            eprintln!("warning: unknown node id {id}, not navigated");
        }
    }
    if let Some(query) = &cmd.query {
        picker.set_search(query);
    }

    output_picker(&picker, &selection, cmd.json)
}
