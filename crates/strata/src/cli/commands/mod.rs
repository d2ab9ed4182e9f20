//! Command implementations and dispatch.

pub mod browse;
pub mod check;
pub mod config;
pub mod get;
pub mod init;
pub mod show;
pub mod status;
pub mod toggle;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
        Commands::Check => check::run(ctx),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Toggle(cmd) => toggle::run(ctx, &cmd),
        Commands::Browse(cmd) => browse::run(ctx, &cmd),
        Commands::Show(cmd) => show::run(ctx, &cmd),
    }
}
