//! Command-line interface for strata.

use std::process::ExitCode;

use strata::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, init_logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(cli.nodes),
        _ => CommandContext::load(cli.nodes),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
