//! In-memory discussion used by publisher and run tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::github::error::ReminderError;
use crate::github::gateway::DiscussionGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{CommentId, DiscussionComment, DiscussionId, DiscussionTarget};

pub(crate) const CATEGORY: &str = "Reviews";
pub(crate) const TITLE: &str = "Pending reviews";

#[derive(Debug, Default)]
struct State {
    comments: Vec<DiscussionComment>,
    next_id: u32,
    deleted: Vec<String>,
    posts: usize,
    failing_reviewer: Option<String>,
}

/// A single discussion titled [`TITLE`] in category [`CATEGORY`].
#[derive(Debug, Default)]
pub(crate) struct FakeDiscussion {
    state: Mutex<State>,
}

impl FakeDiscussion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake discussion lock poisoned")
    }

    /// Seeds an existing comment.
    pub(crate) fn with_comment(self, body: &str, authored_by_viewer: bool) -> Self {
        {
            let mut state = self.state();
            state.next_id += 1;
            let id = format!("C_{}", state.next_id);
            state.comments.push(DiscussionComment {
                id: CommentId::new(id),
                body: body.to_owned(),
                authored_by_viewer,
            });
        }
        self
    }

    /// Makes posting fail for bodies addressed to `reviewer`.
    pub(crate) fn failing_for(self, reviewer: &str) -> Self {
        self.state().failing_reviewer = Some(reviewer.to_owned());
        self
    }

    pub(crate) fn bodies(&self) -> Vec<String> {
        self.state()
            .comments
            .iter()
            .map(|comment| comment.body.clone())
            .collect()
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.state().deleted.clone()
    }

    pub(crate) fn posts(&self) -> usize {
        self.state().posts
    }
}

#[async_trait]
impl DiscussionGateway for FakeDiscussion {
    async fn find_discussion(
        &self,
        _locator: &RepositoryLocator,
        category: &str,
        title: &str,
    ) -> Result<DiscussionTarget, ReminderError> {
        if category != CATEGORY {
            return Err(ReminderError::DiscussionCategoryNotFound {
                category: category.to_owned(),
            });
        }
        if title != TITLE {
            return Err(ReminderError::DiscussionNotFound {
                category: category.to_owned(),
                title: title.to_owned(),
            });
        }
        Ok(DiscussionTarget {
            id: DiscussionId::new("D_1"),
            number: 1,
        })
    }

    async fn list_comments(
        &self,
        _locator: &RepositoryLocator,
        discussion_number: u64,
    ) -> Result<Vec<DiscussionComment>, ReminderError> {
        assert_eq!(discussion_number, 1, "unexpected discussion number");
        Ok(self.state().comments.clone())
    }

    async fn delete_comment(&self, comment: &CommentId) -> Result<(), ReminderError> {
        let mut state = self.state();
        let before = state.comments.len();
        state.comments.retain(|existing| existing.id != *comment);
        if state.comments.len() == before {
            return Err(ReminderError::Api {
                message: format!("comment {} not found", comment.as_str()),
            });
        }
        state.deleted.push(comment.as_str().to_owned());
        Ok(())
    }

    async fn post_comment(
        &self,
        discussion: &DiscussionId,
        body: &str,
    ) -> Result<(), ReminderError> {
        assert_eq!(discussion.as_str(), "D_1", "unexpected discussion id");
        let mut state = self.state();
        let fails = state
            .failing_reviewer
            .as_deref()
            .is_some_and(|reviewer| body.contains(&format!("@{reviewer}")));
        if fails {
            return Err(ReminderError::Network {
                message: "connection reset".to_owned(),
            });
        }
        state.next_id += 1;
        let id = format!("C_{}", state.next_id);
        state.comments.push(DiscussionComment {
            id: CommentId::new(id),
            body: body.to_owned(),
            authored_by_viewer: true,
        });
        state.posts += 1;
        Ok(())
    }
}
