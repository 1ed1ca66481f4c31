//! Review-nudge CLI entrypoint: one reminder pass per invocation.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use review_nudge::logging::init_logging;
use review_nudge::{ReminderConfig, ReminderError, RunSummary, run};

#[tokio::main]
async fn main() -> ExitCode {
    match execute().await {
        Ok(summary) => {
            tracing::info!(
                notified = summary.notified,
                dry_run = summary.skipped_dry_run,
                retired = summary.retired,
                "reminder pass complete"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                tracing::error!(%error, "reminder pass failed");
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute() -> Result<RunSummary, ReminderError> {
    let config = load_config()?;
    init_logging(config.verbose);

    let settings = config.into_settings()?;
    run(&settings).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReminderError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ReminderConfig, ReminderError> {
    ReminderConfig::load().map_err(|error| ReminderError::Configuration {
        message: error.to_string(),
    })
}
