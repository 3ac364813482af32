//! yamlcfg: load YAML configuration from the first existing candidate path.
//!
//! This is the entry point for the `yamlcfg` CLI. It parses arguments,
//! installs logging, dispatches to the command handler, and maps errors to
//! exit codes.

mod cli;
mod commands;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yamlcfg::exit_codes;

fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(cli::usage_exit_code(&err) as u8);
        }
    };
    init_logging(cli.verbose);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr; RUST_LOG wins over `-v`.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "yamlcfg=debug",
        _ => "yamlcfg=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
