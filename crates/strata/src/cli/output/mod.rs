//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use serde::Serialize;
pub use strata_highlight::{dim, header, level_badge, subheader, success, warning};
use strata_highlight::reverse;
use strata_tree::{
    Annotation, Column, Mode, NavigationController, Node, NodeId, NodeStore, Picker, Selection,
};

/// JSON view of a picker: its state and every annotated column.
#[derive(Serialize)]
struct JsonPickerView<'a> {
    /// Click behaviour in effect.
    mode: Mode,
    /// The selection the columns were annotated against.
    selection: &'a Selection,
    /// Active id per drillable level, starting at level 1.
    navigation: &'a [Option<NodeId>],
    /// Normalized search text; empty when nothing is filtered.
    search: &'a str,
    /// Annotated columns.
    columns: Vec<Column<'a>>,
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the picker's columns, as text or JSON.
pub fn output_picker(picker: &Picker, selection: &Selection, json: bool) -> ExitCode {
    let columns = picker.columns(selection);
    if json {
        return print_json(&JsonPickerView {
            mode: picker.mode(),
            selection,
            navigation: picker.navigation().path(),
            search: picker.search().as_str(),
            columns,
        });
    }

    let store = picker.store();
    println!("{} {}", subheader("Mode:"), picker.mode());
    println!("{} {}", subheader("Selection:"), format_selection(selection, store));
    println!(
        "{} {}",
        subheader("Path:"),
        format_path(picker.navigation(), store)
    );
    if !picker.search().is_empty() {
        println!("{} {}", subheader("Search:"), picker.search().as_str());
    }
    println!();
    print!("{}", render_columns(&columns, picker.navigation()));
    ExitCode::SUCCESS
}

/// Renders columns as indented text blocks.
pub fn render_columns(columns: &[Column<'_>], nav: &NavigationController) -> String {
    let mut lines = Vec::new();
    for column in columns {
        lines.push(format!(
            "{} {}",
            level_badge(column.level.get()),
            dim(&format!("({})", column.entries.len()))
        ));
        if column.entries.is_empty() {
            lines.push(format!("   {}", dim("(empty)")));
        }
        lines.extend(
            column
                .entries
                .iter()
                .map(|entry| format!("   {}", render_entry(entry, nav))),
        );
        if column.hidden > 0 {
            lines.push(format!("   {}", dim(&format!("{} hidden by search", column.hidden))));
        }
        lines.push(String::new());
    }
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// One line per entry: selection mark, child marker, name, id.
fn render_entry(entry: &Annotation<'_>, nav: &NavigationController) -> String {
    let mark = if entry.is_selected { "[x]" } else { "[ ]" };
    let child = if entry.is_child { ">" } else { " " };
    let name = if nav.active(entry.node.level) == Some(entry.node.id) {
        reverse(&entry.node.name)
    } else if entry.is_relevant {
        entry.node.name.clone()
    } else {
        dim(&entry.node.name)
    };
    format!("{mark} {child} {name} {}", dim(&format!("#{}", entry.node.id)))
}

/// Formats a node as `L<n> name #id`.
pub fn format_node(node: &Node) -> String {
    format!(
        "{} {} {}",
        level_badge(node.level.get()),
        node.name,
        dim(&format!("#{}", node.id))
    )
}

/// Formats a selection as its ids plus names where known.
pub fn format_selection(selection: &Selection, store: &NodeStore) -> String {
    if selection.is_empty() {
        return dim("(empty)");
    }
    selection
        .iter()
        .map(|id| match store.get(id) {
            Some(node) => format!("{} {}", node.name, dim(&format!("#{id}"))),
            None => format!("{} {}", dim("?"), dim(&format!("#{id}"))),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats the drill path as `name > name > ...`.
pub fn format_path(nav: &NavigationController, store: &NodeStore) -> String {
    let names: Vec<String> = nav
        .path()
        .iter()
        .flatten()
        .map(|id| {
            store
                .get(*id)
                .map_or_else(|| format!("#{id}"), |node| node.name.clone())
        })
        .collect();
    if names.is_empty() {
        dim("(root)")
    } else {
        names.join(" > ")
    }
}
