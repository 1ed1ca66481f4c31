//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;

use crate::github::error::ReminderError;

use super::graphql::GraphQlError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ReminderError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        let message = &source.message;
        if is_rate_limit_error(source) {
            return ReminderError::RateLimitExceeded {
                message: format!("{operation} failed: {message}"),
            };
        }
        return if is_auth_failure(status) {
            ReminderError::Authentication {
                message: format!("{operation} failed: GitHub returned {status} {message}"),
            }
        } else {
            ReminderError::Api {
                message: format!("{operation} failed with status {status}: {message}"),
            }
        };
    }

    if is_network_error(error) {
        return ReminderError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ReminderError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps the `errors` array of a GraphQL response.
///
/// GitHub answers GraphQL failures with status 200, so these are checked
/// separately from HTTP errors.
pub(super) fn map_graphql_errors(operation: &str, errors: &[GraphQlError]) -> ReminderError {
    let message = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let rate_limited = errors
        .iter()
        .any(|error| error.kind.as_deref() == Some("RATE_LIMITED"));
    if rate_limited {
        return ReminderError::RateLimitExceeded {
            message: format!("{operation} failed: {message}"),
        };
    }

    ReminderError::Api {
        message: format!("{operation} failed: {message}"),
    }
}
