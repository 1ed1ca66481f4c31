//! GraphQL documents and response shapes for GitHub Discussions.

use serde::Deserialize;

use crate::github::models::{CommentId, DiscussionComment};
use crate::github::pagination::{CursorPage, CursorPageInfo};

pub(super) const CATEGORIES_QUERY: &str = r"
query ($owner: String!, $repository: String!) {
  repository(owner: $owner, name: $repository) {
    discussionCategories(first: 100) {
      nodes { id name }
    }
  }
}";

pub(super) const DISCUSSIONS_QUERY: &str = r"
query ($owner: String!, $repository: String!, $categoryId: ID!, $after: String) {
  repository(owner: $owner, name: $repository) {
    discussions(categoryId: $categoryId, first: 100, after: $after) {
      nodes { id title number }
      pageInfo { hasNextPage endCursor }
    }
  }
}";

pub(super) const COMMENTS_QUERY: &str = r"
query ($owner: String!, $repository: String!, $number: Int!, $after: String) {
  repository(owner: $owner, name: $repository) {
    discussion(number: $number) {
      comments(first: 100, after: $after) {
        nodes { id body viewerDidAuthor }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}";

pub(super) const DELETE_COMMENT_MUTATION: &str = r"
mutation ($commentId: ID!) {
  deleteDiscussionComment(input: { id: $commentId }) {
    clientMutationId
  }
}";

pub(super) const ADD_COMMENT_MUTATION: &str = r"
mutation ($discussionId: ID!, $body: String!) {
  addDiscussionComment(input: { discussionId: $discussionId, body: $body }) {
    comment { id }
  }
}";

/// Wraps the `repository` root field shared by every query.
#[derive(Debug, Deserialize)]
pub(super) struct RepositoryData<T> {
    pub(super) repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CategoriesRepository {
    pub(super) discussion_categories: Connection<CategoryNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryNode {
    pub(super) id: String,
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DiscussionsRepository {
    pub(super) discussions: Connection<DiscussionNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DiscussionNode {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) number: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentsRepository {
    pub(super) discussion: Option<CommentsDiscussion>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentsDiscussion {
    pub(super) comments: Connection<CommentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentNode {
    pub(super) id: String,
    #[serde(default)]
    pub(super) body: String,
    #[serde(default)]
    pub(super) viewer_did_author: bool,
}

/// A GraphQL connection with optional `pageInfo`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound = "T: Deserialize<'de>")]
pub(super) struct Connection<T> {
    #[serde(default)]
    pub(super) nodes: Vec<T>,
    #[serde(default)]
    pub(super) page_info: CursorPageInfo,
}

impl<T> From<Connection<T>> for CursorPage<T> {
    fn from(value: Connection<T>) -> Self {
        Self {
            nodes: value.nodes,
            page_info: value.page_info,
        }
    }
}

impl From<CommentNode> for DiscussionComment {
    fn from(value: CommentNode) -> Self {
        Self {
            id: CommentId::new(value.id),
            body: value.body,
            authored_by_viewer: value.viewer_did_author,
        }
    }
}
