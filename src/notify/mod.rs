//! Publishing reminders into a GitHub Discussion.
//!
//! Each reviewer gets one comment in the configured discussion. Publishing
//! replaces the bot's previous comment for that reviewer, and
//! [`NotificationPublisher::retire_stale`] removes reminders for reviewers
//! who are no longer waiting, so the discussion only ever shows the latest
//! summary.

mod message;

pub use message::{
    DEFAULT_TEMPLATE_PATH, format_pr_list, load_template, marked_reviewer, reminder_marker,
    render_message, render_template, with_marker,
};

use chrono::{DateTime, Utc};

use crate::github::error::ReminderError;
use crate::github::gateway::DiscussionGateway;
use crate::github::models::{DiscussionComment, DiscussionTarget, PullRequest};
use crate::run::ReminderSettings;

/// What [`NotificationPublisher::publish`] did with a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The reminder was posted after deleting earlier ones.
    Posted {
        /// Number of earlier reminders deleted for the same reviewer.
        replaced: usize,
    },
    /// Dry run: the reminder was rendered and logged only.
    Logged,
}

/// Writes reviewer reminders to the configured discussion.
pub struct NotificationPublisher<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    client: &'client Gateway,
    settings: &'client ReminderSettings,
}

impl<'client, Gateway> NotificationPublisher<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    /// Create a publisher for the discussion named in `settings`.
    #[must_use]
    pub const fn new(client: &'client Gateway, settings: &'client ReminderSettings) -> Self {
        Self { client, settings }
    }

    /// Replaces `username`'s reminder with one listing `pull_requests`.
    ///
    /// The message is rendered before anything in the discussion changes.
    /// In dry-run mode the rendered body is logged and no request is made.
    ///
    /// # Errors
    ///
    /// Returns template errors, [`ReminderError::UnresolvedAssignment`] for
    /// pull requests without a resolved assignment for `username`, the
    /// not-found variants when the discussion cannot be located, and any
    /// gateway failure from deleting or posting.
    pub async fn publish(
        &self,
        username: &str,
        pull_requests: &[PullRequest],
        now: DateTime<Utc>,
    ) -> Result<Delivery, ReminderError> {
        let pr_list = format_pr_list(username, pull_requests, now)?;
        let message = render_message(username, &pr_list, &self.settings.template_path)?;

        if self.settings.dry_run {
            tracing::info!(username, body = %message, "dry run, not posting reminder");
            return Ok(Delivery::Logged);
        }

        let target = self.discussion().await?;
        let comments = self
            .client
            .list_comments(&self.settings.locator, target.number)
            .await?;

        let mut replaced = 0;
        for comment in comments
            .iter()
            .filter(|comment| is_reminder_for(comment, username))
        {
            self.client.delete_comment(&comment.id).await?;
            replaced += 1;
        }

        self.client
            .post_comment(&target.id, &with_marker(&message, username))
            .await?;
        tracing::info!(
            username,
            pull_requests = pull_requests.len(),
            replaced,
            "posted reminder"
        );
        Ok(Delivery::Posted { replaced })
    }

    /// Deletes the bot's reminders for reviewers not in
    /// `current_reviewers`, including bot comments without a marker.
    ///
    /// Returns the number of deleted comments; dry runs delete nothing.
    ///
    /// # Errors
    ///
    /// Returns the not-found variants when the discussion cannot be
    /// located and any gateway failure from listing or deleting.
    pub async fn retire_stale(&self, current_reviewers: &[&str]) -> Result<usize, ReminderError> {
        if self.settings.dry_run {
            return Ok(0);
        }

        let target = self.discussion().await?;
        let comments = self
            .client
            .list_comments(&self.settings.locator, target.number)
            .await?;

        let mut retired = 0;
        for comment in comments.iter().filter(|comment| comment.authored_by_viewer) {
            let stale = marked_reviewer(&comment.body)
                .is_none_or(|reviewer| !current_reviewers.contains(&reviewer));
            if stale {
                tracing::info!(comment = comment.id.as_str(), "retiring stale reminder");
                self.client.delete_comment(&comment.id).await?;
                retired += 1;
            }
        }
        Ok(retired)
    }

    async fn discussion(&self) -> Result<DiscussionTarget, ReminderError> {
        self.client
            .find_discussion(
                &self.settings.locator,
                &self.settings.category,
                &self.settings.title,
            )
            .await
    }
}

fn is_reminder_for(comment: &DiscussionComment, username: &str) -> bool {
    comment.authored_by_viewer && marked_reviewer(&comment.body) == Some(username)
}

#[cfg(test)]
pub(crate) mod fake;
