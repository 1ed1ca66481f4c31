//! Gateways for talking to GitHub through Octocrab.
//!
//! This module provides trait-based gateways for communicating with the GitHub
//! API. The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests: REST for pull requests and
//! their timelines, GraphQL for Discussions.

mod client;
mod discussion;
mod error_mapping;
mod graphql;
mod pull_request;

pub use client::{OctocrabGateway, REQUEST_TIMEOUT};

use async_trait::async_trait;

use crate::github::error::ReminderError;
use crate::github::locator::{PullRequestNumber, RepositoryLocator};
use crate::github::models::{
    CommentId, DiscussionComment, DiscussionId, DiscussionTarget, PullRequest, TimelineEvent,
};

/// Gateway that can read pull requests and their timelines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch every open pull request, oldest page first.
    ///
    /// Assignees on the returned pull requests have no assignment time yet.
    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequest>, ReminderError>;

    /// Fetch every timeline event of a pull request in page order.
    async fn list_timeline_events(
        &self,
        locator: &RepositoryLocator,
        number: PullRequestNumber,
    ) -> Result<Vec<TimelineEvent>, ReminderError>;
}

/// Gateway for reading and commenting on GitHub Discussions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionGateway: Send + Sync {
    /// Locate a discussion by category name and exact title.
    async fn find_discussion(
        &self,
        locator: &RepositoryLocator,
        category: &str,
        title: &str,
    ) -> Result<DiscussionTarget, ReminderError>;

    /// List every top-level comment of a discussion, oldest first.
    async fn list_comments(
        &self,
        locator: &RepositoryLocator,
        discussion_number: u64,
    ) -> Result<Vec<DiscussionComment>, ReminderError>;

    /// Delete a discussion comment.
    async fn delete_comment(&self, comment: &CommentId) -> Result<(), ReminderError>;

    /// Add a comment to a discussion.
    async fn post_comment(&self, discussion: &DiscussionId, body: &str)
    -> Result<(), ReminderError>;
}
