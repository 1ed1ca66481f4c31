//! GraphQL implementation of the discussion gateway.

use async_trait::async_trait;
use serde_json::json;

use crate::github::error::ReminderError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{CommentId, DiscussionComment, DiscussionId, DiscussionTarget};
use crate::github::pagination::{CursorPage, collect_cursor_pages};

use super::DiscussionGateway;
use super::client::OctocrabGateway;
use super::graphql::execute;

mod queries;

use queries::{
    ADD_COMMENT_MUTATION, CATEGORIES_QUERY, COMMENTS_QUERY, CategoriesRepository, CommentNode,
    CommentsRepository, DELETE_COMMENT_MUTATION, DISCUSSIONS_QUERY, DiscussionNode,
    DiscussionsRepository, RepositoryData,
};

fn missing_repository(operation: &str, locator: &RepositoryLocator) -> ReminderError {
    ReminderError::Api {
        message: format!("{operation} failed: repository {locator} not found"),
    }
}

impl OctocrabGateway {
    async fn category_id(
        &self,
        locator: &RepositoryLocator,
        category: &str,
    ) -> Result<String, ReminderError> {
        const OPERATION: &str = "discussion categories";
        tracing::info!(category, "fetching discussion categories");

        let data: RepositoryData<CategoriesRepository> = execute(
            &self.client,
            OPERATION,
            CATEGORIES_QUERY,
            json!({
                "owner": locator.owner().as_str(),
                "repository": locator.repository().as_str(),
            }),
        )
        .await?;

        data.repository
            .ok_or_else(|| missing_repository(OPERATION, locator))?
            .discussion_categories
            .nodes
            .into_iter()
            .find(|node| node.name == category)
            .map(|node| node.id)
            .ok_or_else(|| ReminderError::DiscussionCategoryNotFound {
                category: category.to_owned(),
            })
    }

    async fn discussions_page(
        &self,
        locator: &RepositoryLocator,
        category_id: &str,
        after: Option<String>,
    ) -> Result<CursorPage<DiscussionNode>, ReminderError> {
        const OPERATION: &str = "discussions";

        let data: RepositoryData<DiscussionsRepository> = execute(
            &self.client,
            OPERATION,
            DISCUSSIONS_QUERY,
            json!({
                "owner": locator.owner().as_str(),
                "repository": locator.repository().as_str(),
                "categoryId": category_id,
                "after": after,
            }),
        )
        .await?;

        data.repository
            .map(|repository| repository.discussions.into())
            .ok_or_else(|| missing_repository(OPERATION, locator))
    }

    async fn comments_page(
        &self,
        locator: &RepositoryLocator,
        discussion_number: u64,
        after: Option<String>,
    ) -> Result<CursorPage<CommentNode>, ReminderError> {
        const OPERATION: &str = "discussion comments";

        let data: RepositoryData<CommentsRepository> = execute(
            &self.client,
            OPERATION,
            COMMENTS_QUERY,
            json!({
                "owner": locator.owner().as_str(),
                "repository": locator.repository().as_str(),
                "number": discussion_number,
                "after": after,
            }),
        )
        .await?;

        data.repository
            .ok_or_else(|| missing_repository(OPERATION, locator))?
            .discussion
            .map(|discussion| discussion.comments.into())
            .ok_or_else(|| ReminderError::Api {
                message: format!("{OPERATION} failed: discussion #{discussion_number} not found"),
            })
    }
}

#[async_trait]
impl DiscussionGateway for OctocrabGateway {
    async fn find_discussion(
        &self,
        locator: &RepositoryLocator,
        category: &str,
        title: &str,
    ) -> Result<DiscussionTarget, ReminderError> {
        let category_id = self.category_id(locator, category).await?;
        let category_ref = category_id.as_str();

        tracing::info!(category, title, "fetching discussions");
        let discussions = collect_cursor_pages("discussions", move |after| {
            self.discussions_page(locator, category_ref, after)
        })
        .await?;

        discussions
            .into_iter()
            .find(|node| node.title == title)
            .map(|node| DiscussionTarget {
                id: DiscussionId::new(node.id),
                number: node.number,
            })
            .ok_or_else(|| ReminderError::DiscussionNotFound {
                category: category.to_owned(),
                title: title.to_owned(),
            })
    }

    async fn list_comments(
        &self,
        locator: &RepositoryLocator,
        discussion_number: u64,
    ) -> Result<Vec<DiscussionComment>, ReminderError> {
        tracing::info!(discussion_number, "fetching discussion comments");
        let nodes = collect_cursor_pages("discussion comments", move |after| {
            self.comments_page(locator, discussion_number, after)
        })
        .await?;

        Ok(nodes.into_iter().map(DiscussionComment::from).collect())
    }

    async fn delete_comment(&self, comment: &CommentId) -> Result<(), ReminderError> {
        tracing::info!(comment = comment.as_str(), "deleting discussion comment");
        let _: serde_json::Value = execute(
            &self.client,
            "delete discussion comment",
            DELETE_COMMENT_MUTATION,
            json!({ "commentId": comment.as_str() }),
        )
        .await?;
        Ok(())
    }

    async fn post_comment(
        &self,
        discussion: &DiscussionId,
        body: &str,
    ) -> Result<(), ReminderError> {
        tracing::info!(discussion = discussion.as_str(), "posting discussion comment");
        let _: serde_json::Value = execute(
            &self.client,
            "add discussion comment",
            ADD_COMMENT_MUTATION,
            json!({ "discussionId": discussion.as_str(), "body": body }),
        )
        .await?;
        Ok(())
    }
}
