//! Octocrab client construction for the gateway implementations.

use std::time::Duration;

use http::Uri;
use http::header::{ACCEPT, AUTHORIZATION};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::ReminderError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

use super::error_mapping::map_octocrab_error;

/// Timeout applied to connecting, reading, and writing each request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Builds an Octocrab client for the given token and API base URL.
///
/// Requests carry `Authorization: token <value>`, are attempted exactly once
/// (retries disabled), and time out after [`REQUEST_TIMEOUT`].
///
/// # Errors
///
/// Returns `ReminderError::InvalidUrl` when the base URI cannot be parsed or
/// `ReminderError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ReminderError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ReminderError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| ReminderError::Api {
            message: format!("build client failed: {error}"),
        })?
        .add_header(AUTHORIZATION, token.authorization_header())
        .add_header(ACCEPT, GITHUB_JSON.to_owned())
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(Some(REQUEST_TIMEOUT))
        .set_read_timeout(Some(REQUEST_TIMEOUT))
        .set_write_timeout(Some(REQUEST_TIMEOUT))
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Octocrab-backed gateway for both the REST and the GraphQL operations.
///
/// The gateway can only be built from a validated [`PersonalAccessToken`],
/// so every request it sends is authenticated.
#[derive(Clone)]
pub struct OctocrabGateway {
    pub(super) client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated gateway for the repository's API host.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::InvalidUrl` when the base URI cannot be parsed
    /// or `ReminderError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, ReminderError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}
