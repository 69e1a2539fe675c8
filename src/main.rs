//! Binary entrypoint for the `dailystuff` CLI.

use std::process::ExitCode;

use clap::Parser;
use dailystuff::cli::Cli;
use dailystuff::config::LOG_VAR;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match dailystuff::commands::dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<(), String> {
    let level = if verbose { "debug" } else { "warn" };

    // .env may set the filter, so load it before reading the environment.
    let _ = dotenvy::dotenv();
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| format!("failed to initialize tracing subscriber: {error}"))
}
