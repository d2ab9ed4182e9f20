//! CLI support for the `strata` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

use std::io;

pub use context::CommandContext;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "STRATA_LOG";

/// Installs the stderr log subscriber.
///
/// `-v` forces debug and `-vv` trace; otherwise `STRATA_LOG` is used, falling back to
/// warnings only.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
