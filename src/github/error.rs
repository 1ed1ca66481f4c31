//! Error types exposed by the reminder workflow.

use thiserror::Error;

/// A reviewer whose reminder could not be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFailure {
    /// Reviewer login the reminder was addressed to.
    pub reviewer: String,
    /// Display form of the error that stopped the reminder.
    pub message: String,
}

/// Errors surfaced while configuring the run or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReminderError {
    /// Configuration could not be loaded or a required value is missing.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The repository slug is not in `org/repo` form.
    #[error("repository must be given as <org>/<repo>, got `{0}`")]
    InvalidRepository(String),

    /// The API base URL could not be parsed.
    #[error("API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing or blank.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub refused the request because the rate limit is exhausted.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// A paginated listing did not terminate within the page cap.
    #[error("{resource} listing exceeded {limit} pages")]
    PageLimitExceeded {
        /// Name of the listed resource.
        resource: String,
        /// Maximum number of pages that may be requested.
        limit: u32,
    },

    /// No discussion category carries the configured name.
    #[error("{category} category is missing in GitHub Discussions")]
    DiscussionCategoryNotFound {
        /// Category name that was searched for.
        category: String,
    },

    /// The category exists but holds no discussion with the configured title.
    #[error(
        "discussion titled `{title}` not found in category {category}, \
         please create a discussion with that title"
    )]
    DiscussionNotFound {
        /// Category the discussion was searched in.
        category: String,
        /// Exact title that was searched for.
        title: String,
    },

    /// The notification template file does not exist.
    #[error("please add a template file at: {path}")]
    TemplateNotFound {
        /// Path that was probed.
        path: String,
    },

    /// The notification template could not be parsed or rendered.
    #[error("template error: {message}")]
    Template {
        /// Error detail from the template engine.
        message: String,
    },

    /// A waiting time was requested for an assignee whose assignment
    /// timestamp was never resolved.
    #[error("assignment time for @{username} has not been resolved")]
    UnresolvedAssignment {
        /// Assignee login.
        username: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// One or more reviewers could not be notified.
    #[error("failed to notify {}", describe_failures(failures))]
    PublishFailed {
        /// Every reviewer whose reminder failed, in processing order.
        failures: Vec<PublishFailure>,
    },
}

impl ReminderError {
    /// Whether this error would repeat for every reviewer, so that
    /// continuing with the next one is pointless.
    #[must_use]
    pub const fn aborts_run(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. }
                | Self::RateLimitExceeded { .. }
                | Self::DiscussionCategoryNotFound { .. }
                | Self::DiscussionNotFound { .. }
                | Self::TemplateNotFound { .. }
                | Self::Template { .. }
        )
    }
}

fn describe_failures(failures: &[PublishFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("@{} ({})", failure.reviewer, failure.message))
        .collect::<Vec<_>>()
        .join(", ")
}
