//! One reminder pass over a repository.
//!
//! A pass scans open pull requests, retires reminders for reviewers who are
//! no longer waiting, then publishes one reminder per waiting reviewer in
//! the order the reviewers were found.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};

use crate::github::error::{PublishFailure, ReminderError};
use crate::github::gateway::{DiscussionGateway, OctocrabGateway, PullRequestGateway};
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::notify::{Delivery, NotificationPublisher};
use crate::review::PendingReviewScanner;

/// Validated inputs for a reminder pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    /// Token used for every GitHub request.
    pub token: PersonalAccessToken,
    /// Repository to scan, including the API base URL.
    pub locator: RepositoryLocator,
    /// Discussion category holding the reminder discussion.
    pub category: String,
    /// Exact title of the reminder discussion.
    pub title: String,
    /// Minimum wait, in hours, before a reviewer is reminded.
    pub max_wait_hours: u32,
    /// Markdown template for the reminder body.
    pub template_path: Utf8PathBuf,
    /// Render and log reminders without changing the discussion.
    pub dry_run: bool,
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Reviewers whose reminder was posted.
    pub notified: usize,
    /// Reviewers whose reminder was only logged because of a dry run.
    pub skipped_dry_run: usize,
    /// Stale reminders deleted before publishing.
    pub retired: usize,
}

/// Runs a pass against GitHub using the wall clock.
///
/// # Errors
///
/// See [`run_reminders`].
pub async fn run(settings: &ReminderSettings) -> Result<RunSummary, ReminderError> {
    let gateway = OctocrabGateway::for_token(&settings.token, &settings.locator)?;
    run_reminders(settings, &gateway, &gateway, Utc::now()).await
}

/// Runs a pass evaluated at `now`.
///
/// Scanning and the stale sweep abort on the first error. A failed reminder
/// is logged and the pass moves on to the next reviewer, unless the error
/// would repeat for every reviewer (see [`ReminderError::aborts_run`]).
///
/// # Errors
///
/// Returns the first scan or sweep error, the first run-aborting publish
/// error, or [`ReminderError::PublishFailed`] listing every reviewer whose
/// reminder failed.
pub async fn run_reminders<Pulls, Discussions>(
    settings: &ReminderSettings,
    pulls: &Pulls,
    discussions: &Discussions,
    now: DateTime<Utc>,
) -> Result<RunSummary, ReminderError>
where
    Pulls: PullRequestGateway,
    Discussions: DiscussionGateway,
{
    let index = PendingReviewScanner::new(pulls)
        .scan(&settings.locator, settings.max_wait_hours, now)
        .await?;
    tracing::info!(
        reviewers = index.len(),
        repository = %settings.locator,
        "found reviewers waiting on pull requests"
    );

    let publisher = NotificationPublisher::new(discussions, settings);
    let current: Vec<&str> = index.reviewers().collect();
    let mut summary = RunSummary {
        retired: publisher.retire_stale(&current).await?,
        ..RunSummary::default()
    };

    let mut failures = Vec::new();
    for (reviewer, pull_requests) in index.entries() {
        match publisher.publish(reviewer, pull_requests, now).await {
            Ok(Delivery::Posted { .. }) => summary.notified += 1,
            Ok(Delivery::Logged) => summary.skipped_dry_run += 1,
            Err(error) if error.aborts_run() => return Err(error),
            Err(error) => {
                tracing::warn!(reviewer, %error, "failed to notify reviewer");
                failures.push(PublishFailure {
                    reviewer: reviewer.to_owned(),
                    message: error.to_string(),
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(summary)
    } else {
        Err(ReminderError::PublishFailed { failures })
    }
}
