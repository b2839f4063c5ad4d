mod commands;
mod config;
mod error;
mod models;
mod services;
mod ui;

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use commands::Cli;
use error::AppError;
use models::Outcome;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(&cli);

    let result = commands::handle(&cli).await;
    exit_code(&result)
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Maps the terminal state of a run to the process exit status.
fn exit_code(result: &Result<Outcome, AppError>) -> ExitCode {
    match result {
        Ok(outcome) => {
            debug!("Finished with {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
