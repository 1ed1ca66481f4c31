//! Domain models for pull requests, their assignees, and discussions.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::ReminderError;
use super::locator::PullRequestNumber;

mod discussion;
mod waiting_time;

#[cfg(test)]
pub(crate) mod test_support;

pub use discussion::{CommentId, DiscussionComment, DiscussionId, DiscussionTarget};
pub use waiting_time::WaitingTime;

/// Timeline event kind recording that a user was assigned.
pub const ASSIGNED_EVENT: &str = "assigned";

/// A user assigned to a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    username: String,
    assigned_at: Option<DateTime<Utc>>,
}

impl Assignee {
    /// Creates an assignee whose assignment time is not yet known.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            assigned_at: None,
        }
    }

    /// Creates an assignee with a known assignment time.
    #[must_use]
    pub fn assigned(username: impl Into<String>, assigned_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            assigned_at: Some(assigned_at),
        }
    }

    /// GitHub login of the assignee.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Most recent assignment time seen so far, if any.
    #[must_use]
    pub const fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
    }

    /// Records an assignment, keeping whichever of the stored and the new
    /// time is later. An unset time is older than any recorded one.
    pub fn record_assignment(&mut self, at: DateTime<Utc>) {
        self.assigned_at = Some(self.assigned_at.map_or(at, |current| current.max(at)));
    }

    /// Wait from the latest assignment until `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::UnresolvedAssignment`] when no assignment
    /// time has been recorded.
    pub fn waiting_time_at(&self, now: DateTime<Utc>) -> Result<WaitingTime, ReminderError> {
        self.assigned_at
            .map(|assigned_at| WaitingTime::between(assigned_at, now))
            .ok_or_else(|| ReminderError::UnresolvedAssignment {
                username: self.username.clone(),
            })
    }

    /// Wait from the latest assignment until the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::UnresolvedAssignment`] when no assignment
    /// time has been recorded.
    pub fn waiting_time(&self) -> Result<WaitingTime, ReminderError> {
        self.waiting_time_at(Utc::now())
    }
}

/// An open pull request with its assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    url: String,
    number: PullRequestNumber,
    author: String,
    title: String,
    assignees: Vec<Assignee>,
}

impl PullRequest {
    /// Creates a pull request. Assignees keep the order given.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        number: PullRequestNumber,
        author: impl Into<String>,
        title: impl Into<String>,
        assignees: Vec<Assignee>,
    ) -> Self {
        Self {
            url: url.into(),
            number,
            author: author.into(),
            title: title.into(),
            assignees,
        }
    }

    /// HTML URL of the pull request.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// Login of the pull request author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Pull request title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Assignees in the order GitHub reported them.
    #[must_use]
    pub fn assignees(&self) -> &[Assignee] {
        &self.assignees
    }

    /// Whether someone other than the author is assigned.
    ///
    /// A pull request assigned only to its own author has no reviewer.
    #[must_use]
    pub fn has_reviewer_assigned(&self) -> bool {
        match self.assignees.as_slice() {
            [] => false,
            [only] => only.username != self.author,
            _ => true,
        }
    }

    /// Assignees other than the author.
    pub fn reviewers(&self) -> impl Iterator<Item = &Assignee> {
        self.assignees
            .iter()
            .filter(move |assignee| assignee.username != self.author)
    }

    /// Looks up an assignee by login.
    #[must_use]
    pub fn assignee(&self, username: &str) -> Option<&Assignee> {
        self.assignees
            .iter()
            .find(|assignee| assignee.username == username)
    }

    /// Records an assignment for `username` if they are still assigned.
    ///
    /// Returns `false` when the user is no longer among the assignees.
    pub fn record_assignment(&mut self, username: &str, at: DateTime<Utc>) -> bool {
        let Some(assignee) = self
            .assignees
            .iter_mut()
            .find(|assignee| assignee.username == username)
        else {
            return false;
        };
        assignee.record_assignment(at);
        true
    }
}

/// A single entry from an issue timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    /// Event kind, e.g. `assigned`, `labeled`, `commented`.
    pub kind: String,
    /// Login of the affected assignee, for assignment events.
    pub assignee: Option<String>,
    /// When the event happened, if GitHub reports it for this kind.
    pub created_at: Option<DateTime<Utc>>,
}

impl TimelineEvent {
    /// Builds an `assigned` event.
    #[must_use]
    pub fn assigned(username: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind: ASSIGNED_EVENT.to_owned(),
            assignee: Some(username.into()),
            created_at: Some(at),
        }
    }

    /// Returns the assignee and time when this is a complete assignment
    /// event.
    #[must_use]
    pub fn assignment(&self) -> Option<(&str, DateTime<Utc>)> {
        if self.kind != ASSIGNED_EVENT {
            return None;
        }
        Some((self.assignee.as_deref()?, self.created_at?))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

/// API response entry from the pull request list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) html_url: Option<String>,
    pub(super) title: Option<String>,
    pub(super) user: Option<ApiUser>,
    #[serde(default)]
    pub(super) assignees: Vec<ApiUser>,
}

/// API response entry from the issue timeline endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiTimelineEvent {
    pub(super) event: Option<String>,
    pub(super) assignee: Option<ApiUser>,
    pub(super) created_at: Option<DateTime<Utc>>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        let assignees = value
            .assignees
            .into_iter()
            .filter_map(|user| user.login)
            .map(Assignee::new)
            .collect();

        Self {
            url: value.html_url.unwrap_or_default(),
            number: PullRequestNumber::new(value.number),
            author: value.user.and_then(|user| user.login).unwrap_or_default(),
            title: value.title.unwrap_or_default(),
            assignees,
        }
    }
}

impl From<ApiTimelineEvent> for TimelineEvent {
    fn from(value: ApiTimelineEvent) -> Self {
        Self {
            kind: value.event.unwrap_or_default(),
            assignee: value.assignee.and_then(|user| user.login),
            created_at: value.created_at,
        }
    }
}
