//! Implementation of `strata get`.

use std::process::ExitCode;

use serde::Serialize;
use strata_tree::{AncestorResolver, DescendantIndex, Node, NodeId};

use crate::cli::{
    args::GetCommand,
    context::CommandContext,
    output::{dim, format_node, print_json, subheader, warning},
};

/// JSON view of a node and its surroundings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonNodeView<'a> {
    /// The node itself.
    node: &'a Node,
    /// Ancestor ids from the root down to the parent.
    ancestors: Vec<NodeId>,
    /// Names from the root down to the node.
    breadcrumb: Vec<&'a str>,
    /// True if a parent link could not be followed.
    truncated: bool,
    /// Direct children.
    children: Vec<&'a Node>,
    /// Number of nodes below this one.
    descendant_count: usize,
}

/// Shows a node with its ancestry, children, and descendant count.
pub fn run(ctx: &CommandContext, cmd: &GetCommand) -> ExitCode {
    let store = match ctx.load_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let Some(node) = store.get(cmd.id) else {
        eprintln!("error: not found: {}", cmd.id);
        return ExitCode::FAILURE;
    };

    let resolver = AncestorResolver::new(&store);
    let chain = resolver.resolve(node);
    let descendants = DescendantIndex::build(&store);
    let view = JsonNodeView {
        node,
        ancestors: chain.root_first().collect(),
        breadcrumb: resolver.breadcrumb(node),
        truncated: chain.truncated,
        children: store.child_nodes(node.id).collect(),
        descendant_count: descendants.descendants(node.id).len(),
    };

    if cmd.json {
        return print_json(&view);
    }

    println!("{}", format_node(node));
    println!("   {}", dim(&view.breadcrumb.join(" > ")));
    if view.truncated {
        println!("   {}", warning("ancestor chain is incomplete"));
    }
    println!();

    if let Some(parent) = node.parent_id {
        println!("{}", subheader("Parent:"));
        match store.get(parent) {
            Some(p) => println!("   {}", format_node(p)),
            None => println!("   {} {}", dim(&format!("#{parent}")), warning("[missing]")),
        }
        println!();
    }

    println!("{}", subheader(&format!("Children ({}):", view.children.len())));
    if view.children.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for child in &view.children {
        println!("   {}", format_node(child));
    }
    println!();
    println!(
        "{} {}",
        subheader("Descendants:"),
        view.descendant_count
    );

    ExitCode::SUCCESS
}
