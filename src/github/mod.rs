//! GitHub access for the reminder run.
//!
//! This module wraps Octocrab to list open pull requests, replay their issue
//! timelines, and read or write comments on a GitHub Discussion. Errors are
//! mapped into [`ReminderError`] variants so callers can report precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::{PublishFailure, ReminderError};
pub use gateway::{DiscussionGateway, OctocrabGateway, PullRequestGateway};
pub use locator::{
    PersonalAccessToken, PullRequestNumber, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{
    Assignee, CommentId, DiscussionComment, DiscussionId, DiscussionTarget, PullRequest,
    TimelineEvent, WaitingTime,
};

#[cfg(test)]
pub use gateway::{MockDiscussionGateway, MockPullRequestGateway};
