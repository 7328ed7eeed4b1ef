//! `swara-sethu analyze`: one submission through the proxy.

use crate::{
    AppError, AppResult,
    cli::AnalyzeArgs,
    config::Config,
    report::{render_banner, render_report, stage_line},
};

use swara_sethu_core::{AnalysisSession, ErrorKind, ProcessingStage, ProxyClient, UploadedFile};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, instrument};

/// Outcome of the command, mapped to the exit status by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Completed,
    /// Refused with the message already printed to stderr.
    Rejected { message: String },
}

impl Outcome {
    fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        eprintln!("{}", message);
        Outcome::Rejected { message }
    }
}

/// Preflight, count and describe the files, submit and print the result.
#[instrument(skip(config, args), fields(file_count = args.files.len()))]
pub(crate) async fn run(config: &Config, args: AnalyzeArgs) -> AppResult<Outcome> {
    let proxy_url = args.proxy_url.unwrap_or_else(|| config.proxy_url());
    let client = ProxyClient::new(proxy_url)?;
    let mut session = AnalysisSession::new(client, config.progress.ticker());

    if session.preflight().await.is_err() {
        return Ok(Outcome::rejected(render_banner(
            session.error().unwrap_or_default(),
        )));
    }

    if session.check_selection(args.files.len()).is_err() {
        return Ok(Outcome::rejected(
            session.intake_error().unwrap_or_default(),
        ));
    }

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match UploadedFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                return Ok(Outcome::rejected(format!(
                    "{}: {}",
                    path.display(),
                    e.user_message()
                )));
            }
        }
    }

    let printer = (!args.json).then(|| spawn_stage_printer(session.subscribe()));

    let outcome = session.submit(files).await;

    if let Some(printer) = printer {
        printer.abort();
    }

    match outcome {
        Ok(result) => {
            if args.json {
                let json =
                    serde_json::to_string_pretty(&result).map_err(|e| AppError::OutputError {
                        reason: format!("Failed to serialize result: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                println!("{}", json);
            } else {
                println!();
                print!("{}", render_report(&result));
            }
            info!(classification = %result.classification, "Analysis printed");
            Ok(Outcome::Completed)
        }
        Err(e) if e.kind() == ErrorKind::Validation => Ok(Outcome::rejected(
            session.intake_error().unwrap_or_default(),
        )),
        Err(_) => Ok(Outcome::rejected(render_banner(
            session.error().unwrap_or_default(),
        ))),
    }
}

fn spawn_stage_printer(mut rx: watch::Receiver<ProcessingStage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let stage = *rx.borrow_and_update();
            debug!(stage = %stage, "Stage changed");
            if let Some(line) = stage_line(stage) {
                println!("{}", line);
            }
            if stage.is_terminal() {
                break;
            }
        }
    })
}
