//! GitHub Discussions identifiers and comments.

/// GraphQL node ID of a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionId(String);

impl DiscussionId {
    /// Wraps a discussion node ID.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the node ID.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// GraphQL node ID of a discussion comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentId(String);

impl CommentId {
    /// Wraps a comment node ID.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the node ID.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The discussion reminders are posted to, located by category and title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionTarget {
    /// Node ID used by mutations.
    pub id: DiscussionId,
    /// Repository-scoped number used by queries.
    pub number: u64,
}

/// A top-level comment in a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionComment {
    /// Comment node ID.
    pub id: CommentId,
    /// Markdown body.
    pub body: String,
    /// Whether the authenticated account wrote this comment.
    pub authored_by_viewer: bool,
}
