//! Builders for pull request fixtures used by unit tests.

use chrono::{DateTime, TimeDelta, Utc};

use super::{Assignee, PullRequest};
use crate::github::locator::PullRequestNumber;

/// Builds a pull request whose assignees have no resolved assignment time.
///
/// The URL is `https://github.com/org/repo/pull/<number>` and the title is
/// `PR <number>`.
#[must_use]
pub fn pull_request(number: u64, author: &str, assignees: &[&str]) -> PullRequest {
    PullRequest::new(
        format!("https://github.com/org/repo/pull/{number}"),
        PullRequestNumber::new(number),
        author,
        format!("PR {number}"),
        assignees.iter().copied().map(Assignee::new).collect(),
    )
}

/// Builds a pull request whose assignees were assigned the given number of
/// hours before `now`.
#[must_use]
pub fn waiting_pull_request(
    number: u64,
    author: &str,
    assignees: &[(&str, i64)],
    now: DateTime<Utc>,
) -> PullRequest {
    PullRequest::new(
        format!("https://github.com/org/repo/pull/{number}"),
        PullRequestNumber::new(number),
        author,
        format!("PR {number}"),
        assignees
            .iter()
            .map(|&(login, hours)| Assignee::assigned(login, now - TimeDelta::hours(hours)))
            .collect(),
    )
}

/// Returns an instant `hours` before `now`.
#[must_use]
pub fn hours_before(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    now - TimeDelta::hours(hours)
}
