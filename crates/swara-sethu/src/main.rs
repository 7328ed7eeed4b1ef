//! Swara Sethu: AI voice detection proxy and command-line client.

mod analyze;
mod cli;
mod config;
mod error;
mod logging;
mod report;
mod server;
#[cfg(test)]
mod tests;

pub(crate) use error::{AppError, Result as AppResult};

use crate::{
    analyze::Outcome,
    cli::{Cli, Command},
    config::Config,
};

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = ?e, "Failed to load config");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Serve(args) => server::run(&config, args).await.map(|_| Outcome::Completed),
        Command::Analyze(args) => analyze::run(&config, args).await,
    };

    match result {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected { .. }) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = ?e, "Command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
