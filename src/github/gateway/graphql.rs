//! Minimal GraphQL envelope handling on top of Octocrab.

use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::github::error::ReminderError;

use super::error_mapping::{map_graphql_errors, map_octocrab_error};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'query> {
    query: &'query str,
    variables: serde_json::Value,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQlError {
    #[serde(rename = "type")]
    pub(super) kind: Option<String>,
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self, operation: &str) -> Result<T, ReminderError> {
        if !self.errors.is_empty() {
            return Err(map_graphql_errors(operation, &self.errors));
        }
        self.data.ok_or_else(|| ReminderError::Api {
            message: format!("{operation} failed: response carried no data"),
        })
    }
}

/// Sends a GraphQL document and returns its `data` member.
///
/// # Errors
///
/// Maps HTTP failures through [`map_octocrab_error`] and a non-empty
/// `errors` array through [`map_graphql_errors`].
pub(super) async fn execute<T>(
    client: &Octocrab,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
) -> Result<T, ReminderError>
where
    T: DeserializeOwned,
{
    let request = GraphQlRequest { query, variables };
    let response: GraphQlResponse<T> = client
        .graphql(&request)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;
    response.into_data(operation)
}
