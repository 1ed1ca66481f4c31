//! Detection of reviewers who have waited too long on a pull request.
//!
//! The scanner lists open pull requests, replays each one's issue timeline
//! to learn when every assignee was (most recently) assigned, and groups
//! the pull requests by reviewer whenever the wait reaches the threshold.

use chrono::{DateTime, TimeDelta, Utc};

use crate::github::error::ReminderError;
use crate::github::gateway::PullRequestGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{PullRequest, TimelineEvent};

/// Applies every assignment event to the matching assignee.
///
/// Events may arrive in any order; the latest assignment per user wins.
/// Events for users no longer assigned are ignored.
pub fn resolve_assigned_timestamps(pull_request: &mut PullRequest, events: &[TimelineEvent]) {
    for (username, at) in events.iter().filter_map(TimelineEvent::assignment) {
        if !pull_request.record_assignment(username, at) {
            tracing::debug!(
                pull_request = pull_request.number().get(),
                username,
                "ignoring assignment of user no longer assigned"
            );
        }
    }
}

/// Pull requests grouped by the reviewer waiting on them.
///
/// Reviewers keep the order in which they were first seen; each reviewer's
/// pull requests keep the order they were listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerWaitIndex {
    entries: Vec<(String, Vec<PullRequest>)>,
}

impl ReviewerWaitIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a pull request to a reviewer's entry, creating it if needed.
    pub fn push(&mut self, reviewer: &str, pull_request: PullRequest) {
        if let Some((_, pulls)) = self.entries.iter_mut().find(|(name, _)| name == reviewer) {
            pulls.push(pull_request);
            return;
        }
        self.entries.push((reviewer.to_owned(), vec![pull_request]));
    }

    /// Pull requests waiting on `reviewer`, if any.
    #[must_use]
    pub fn get(&self, reviewer: &str) -> Option<&[PullRequest]> {
        self.entries
            .iter()
            .find(|(name, _)| name == reviewer)
            .map(|(_, pulls)| pulls.as_slice())
    }

    /// Whether `reviewer` has an entry.
    #[must_use]
    pub fn contains(&self, reviewer: &str) -> bool {
        self.get(reviewer).is_some()
    }

    /// Reviewer logins in first-seen order.
    pub fn reviewers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Reviewer entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[PullRequest])> {
        self.entries
            .iter()
            .map(|(name, pulls)| (name.as_str(), pulls.as_slice()))
    }

    /// Number of reviewers in the index.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no reviewer is waiting.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`ReviewerWaitIndex`] from a repository's open pull requests.
pub struct PendingReviewScanner<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> PendingReviewScanner<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a scanner using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Scans the repository and returns every reviewer whose wait on a pull
    /// request is at least `threshold_hours` at `now`.
    ///
    /// Pull requests are read sequentially. Those without a reviewer other
    /// than the author are skipped before their timeline is fetched.
    /// Assignees with no assignment event in the timeline are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure; a scan never returns a partial
    /// index.
    pub async fn scan(
        &self,
        locator: &RepositoryLocator,
        threshold_hours: u32,
        now: DateTime<Utc>,
    ) -> Result<ReviewerWaitIndex, ReminderError> {
        let threshold = TimeDelta::hours(i64::from(threshold_hours));
        let pull_requests = self.client.list_open_pull_requests(locator).await?;
        tracing::info!(count = pull_requests.len(), "scanning open pull requests");

        let mut index = ReviewerWaitIndex::new();
        for mut pull_request in pull_requests {
            if !pull_request.has_reviewer_assigned() {
                tracing::debug!(
                    pull_request = pull_request.number().get(),
                    "no reviewer assigned"
                );
                continue;
            }

            let events = self
                .client
                .list_timeline_events(locator, pull_request.number())
                .await?;
            resolve_assigned_timestamps(&mut pull_request, &events);

            for reviewer in waiting_reviewers(&pull_request, threshold, now) {
                index.push(&reviewer, pull_request.clone());
            }
        }

        Ok(index)
    }
}

fn waiting_reviewers(
    pull_request: &PullRequest,
    threshold: TimeDelta,
    now: DateTime<Utc>,
) -> Vec<String> {
    pull_request
        .reviewers()
        .filter_map(|reviewer| {
            let Some(assigned_at) = reviewer.assigned_at() else {
                tracing::warn!(
                    pull_request = pull_request.number().get(),
                    username = reviewer.username(),
                    "no assignment event found, skipping reviewer"
                );
                return None;
            };
            (now - assigned_at >= threshold).then(|| reviewer.username().to_owned())
        })
        .collect()
}
