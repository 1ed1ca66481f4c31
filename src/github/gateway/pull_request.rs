//! REST implementation of the pull request gateway.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::github::error::ReminderError;
use crate::github::locator::{PullRequestNumber, RepositoryLocator};
use crate::github::models::{ApiPullRequest, ApiTimelineEvent, PullRequest, TimelineEvent};
use crate::github::pagination::{PageRequest, collect_pages};

use super::PullRequestGateway;
use super::client::OctocrabGateway;
use super::error_mapping::map_octocrab_error;

impl OctocrabGateway {
    async fn get_page<T>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>, ReminderError>
    where
        T: DeserializeOwned,
    {
        self.client
            .get::<Vec<T>, _, _>(path, Some(query))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))
    }

    async fn pull_request_page(
        &self,
        path: &str,
        request: PageRequest,
    ) -> Result<Vec<ApiPullRequest>, ReminderError> {
        tracing::info!(page = request.page(), "fetching pull requests");
        let mut query = request.query();
        query.push(("state", "open".to_owned()));
        self.get_page("list pulls", path, &query).await
    }

    async fn timeline_page(
        &self,
        path: &str,
        number: PullRequestNumber,
        request: PageRequest,
    ) -> Result<Vec<ApiTimelineEvent>, ReminderError> {
        tracing::info!(
            pull_request = number.get(),
            page = request.page(),
            "fetching PR timeline"
        );
        self.get_page("issue timeline", path, &request.query()).await
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequest>, ReminderError> {
        let path = locator.pulls_path();
        let path_ref = path.as_str();
        let pulls = collect_pages("pull requests", move |request| {
            self.pull_request_page(path_ref, request)
        })
        .await?;

        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }

    async fn list_timeline_events(
        &self,
        locator: &RepositoryLocator,
        number: PullRequestNumber,
    ) -> Result<Vec<TimelineEvent>, ReminderError> {
        let path = locator.timeline_path(number);
        let path_ref = path.as_str();
        let events = collect_pages("timeline events", move |request| {
            self.timeline_page(path_ref, number, request)
        })
        .await?;

        Ok(events.into_iter().map(TimelineEvent::from).collect())
    }
}
