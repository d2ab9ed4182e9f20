//! Implementation of `strata check`.

use std::process::ExitCode;

use strata_tree::check_nodes;

use crate::cli::{
    context::CommandContext,
    output::{subheader, success, warning},
};

/// Reports structural problems in the node snapshot.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let store = match ctx.load_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let warnings = check_nodes(&store, ctx.config.picker.depth);
    if warnings.is_empty() {
        println!(
            "{} ({} nodes)",
            success("No issues found."),
            store.len()
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Issues ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    ExitCode::FAILURE
}
