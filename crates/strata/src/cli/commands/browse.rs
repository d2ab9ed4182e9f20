//! Implementation of `strata browse`.

use std::process::ExitCode;

use strata_tree::{ClickOutcome, Mode, Selection, SilentEvents};

use crate::cli::{args::BrowseCommand, context::CommandContext, output::output_picker};

/// Replays browse-mode clicks and prints the columns they lead to.
pub fn run(ctx: &CommandContext, cmd: &BrowseCommand) -> ExitCode {
    let store = match ctx.load_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let selection = Selection::new();
    let mut picker = ctx.picker(store, Mode::Browse);
    for &id in &cmd.ids {
        if picker.click(&selection, id, &mut SilentEvents) == ClickOutcome::Ignored {
            eprintln!("warning: unknown node id {id}, ignored");
        }
    }

    output_picker(&picker, &selection, cmd.json)
}
