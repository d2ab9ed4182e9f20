//! Clap argument definitions for the `strata` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use strata_tree::{Mode, NodeId};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Browse and select nodes in leveled hierarchies")]
pub struct Cli {
    /// Node snapshot to load instead of the configured [source] path
    #[arg(long, global = true, value_name = "FILE")]
    pub nodes: Option<PathBuf>,

    /// Log verbosity (-v for debug, -vv for trace); overrides STRATA_LOG
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `strata init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.strata.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `strata get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Node id
    pub id: NodeId,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `strata toggle`.
#[derive(Args, Debug, Clone)]
pub struct ToggleCommand {
    /// Node ids to toggle, in order
    #[arg(required = true)]
    pub ids: Vec<NodeId>,

    /// Starting selection (comma-separated ids)
    #[arg(short = 's', long, value_delimiter = ',')]
    pub selected: Vec<NodeId>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `strata browse`.
#[derive(Args, Debug, Clone)]
pub struct BrowseCommand {
    /// Node ids to click in browse mode, in order
    #[arg(required = true)]
    pub ids: Vec<NodeId>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `strata show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Current selection (comma-separated ids)
    #[arg(short = 's', long, value_delimiter = ',')]
    pub selected: Vec<NodeId>,

    /// Ids to drill into (comma-separated)
    #[arg(short = 'n', long = "nav", value_delimiter = ',')]
    pub navigate: Vec<NodeId>,

    /// Search text; columns only list matching nodes
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Relevance mode [default: from config]
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Supported `strata` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize strata configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration, node source, and per-level counts
    Status,

    /// Check the node snapshot for structural problems
    Check,

    /// Show a node with its ancestry and children
    Get(GetCommand),

    /// Replay selection toggles and print each resulting selection
    #[command(after_help = "\
EXAMPLES:
  strata toggle 100                Select 100 with all its ancestors
  strata toggle 100 -s 1,10,100    Deselect 100 from an existing selection
  strata toggle 1 20 --json        Replay two toggles, JSON output")]
    Toggle(ToggleCommand),

    /// Replay browse-mode clicks and print the resulting columns
    Browse(BrowseCommand),

    /// Print annotated columns for a selection, drill path, and search
    Show(ShowCommand),
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_comma_separated_selection() {
        let cli = Cli::try_parse_from(["strata", "toggle", "100", "-s", "1,10"]).unwrap();
        let Commands::Toggle(cmd) = cli.command else {
            panic!("expected toggle");
        };
        assert_eq!(cmd.ids, vec![NodeId(100)]);
        assert_eq!(cmd.selected, vec![NodeId(1), NodeId(10)]);
    }

    #[test]
    fn parses_mode_and_global_flags() {
        let cli =
            Cli::try_parse_from(["strata", "show", "--mode", "browse", "--nodes", "n.json", "-v"])
                .unwrap();
        assert_eq!(cli.nodes, Some(PathBuf::from("n.json")));
        assert_eq!(cli.verbose, 1);
        let Commands::Show(cmd) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(cmd.mode, Some(Mode::Browse));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["strata", "get", "abc"]).is_err());
    }
}
