//! Implementation of `strata status`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use strata_config::{ConfigWarning, discover_config_files};
use strata_tree::{JsonFileSource, Level, NodeSource, NodeStore, check_nodes};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the node source, per-level counts, and warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;
    let config = &ctx.config;

    let config_files = discover_config_files(cwd);
    let source_path = ctx.source_path();
    if config_files.is_empty() && source_path.is_none() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("strata init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    println!("{}", subheader("Source:"));
    match &source_path {
        Some(path) if path.exists() => println!("   {}", path.display()),
        Some(path) => println!("   {} {}", path.display(), warning("[missing]")),
        None => println!("   {}", dim("(none defined)")),
    }
    println!();

    println!("{}", subheader("Picker:"));
    println!("   mode:  {}", config.picker.mode);
    println!("   depth: {}", config.picker.depth);
    println!("   search.min_length: {}", config.search.min_length);
    println!();

    let mut problems: Vec<String> = if ctx.nodes_override().is_some() {
        Vec::new()
    } else {
        config.validate().iter().map(ConfigWarning::to_string).collect()
    };

    if let Some(path) = source_path.as_deref().filter(|p| p.is_file()) {
        match JsonFileSource::new(path).load_store() {
            Ok(store) => {
                print_level_counts(&store, config.picker.depth);
                let issues = check_nodes(&store, config.picker.depth).len();
                if issues > 0 {
                    problems.push(format!(
                        "snapshot has {issues} structural issue(s); run 'strata check'"
                    ));
                }
            }
            Err(e) => problems.push(e.to_string()),
        }
    }

    if problems.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", problems.len())));
    for problem in &problems {
        println!("   {}", warning(problem));
    }
    println!();

    if source_path.is_none() {
        println!(
            "{}",
            dim("Hint: set [source] path in .strata.toml or pass --nodes FILE")
        );
    }

    ExitCode::FAILURE
}

/// Prints a table of node counts for each level up to `depth`.
fn print_level_counts(store: &NodeStore, depth: u8) {
    let deepest = store
        .max_level()
        .map_or_else(|| "empty".to_string(), |level| format!("deepest L{level}"));
    println!(
        "{} {}",
        subheader(&format!("Nodes ({}):", store.len())),
        dim(&format!("({deepest})"))
    );
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Level", "Nodes"]);
    for level in Level::up_to(depth) {
        table.add_row(vec![
            Cell::new(format!("L{level}")),
            Cell::new(store.at_level(level).count().to_string()),
        ]);
    }
    println!("{table}");
    println!();
}
