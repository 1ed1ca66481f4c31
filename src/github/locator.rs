//! Repository identity wrappers and API path construction.

use url::Url;

use super::error::ReminderError;

/// Public GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner (user or organization) wrapper to avoid stringly typed
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ReminderError> {
        if value.is_empty() {
            return Err(ReminderError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ReminderError> {
        if value.is_empty() {
            return Err(ReminderError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number, unique within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a raw pull request number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
///
/// A value of this type always holds a non-blank token, so a gateway built
/// from it can never be used unauthenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReminderError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReminderError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Value for the `Authorization` header.
    pub(crate) fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Repository identity plus the API base used to reach it.
///
/// # Example
///
/// ```
/// use review_nudge::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_slug("oppia/oppia")
///     .expect("should parse repository slug");
/// assert_eq!(locator.owner().as_str(), "oppia");
/// assert_eq!(locator.repository().as_str(), "oppia");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings
    /// against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::InvalidRepository` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ReminderError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base = Url::parse(DEFAULT_API_BASE)
            .map_err(|error| ReminderError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a slash-separated `org/repo` slug.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::InvalidRepository` unless the slug has exactly
    /// two non-empty components.
    pub fn from_slug(slug: &str) -> Result<Self, ReminderError> {
        let mut parts = slug.trim().split('/');
        let invalid = || ReminderError::InvalidRepository(slug.to_owned());

        let owner = parts.next().ok_or_else(invalid)?;
        let repo = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() || owner.is_empty() || repo.is_empty() {
            return Err(invalid());
        }

        Self::from_owner_repo(owner, repo)
    }

    /// Replaces the API base, e.g. for GitHub Enterprise hosts.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::InvalidUrl` when the base cannot be parsed or
    /// is not an HTTP(S) URL.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ReminderError> {
        let parsed =
            Url::parse(api_base).map_err(|error| ReminderError::InvalidUrl(error.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReminderError::InvalidUrl(format!(
                "unsupported scheme in {api_base}"
            )));
        }
        self.api_base = parsed;
        Ok(self)
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path for listing pull requests.
    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    /// Returns the API path for an issue or pull request timeline.
    pub(crate) fn timeline_path(&self, number: PullRequestNumber) -> String {
        format!(
            "/repos/{}/{}/issues/{}/timeline",
            self.owner.as_str(),
            self.repository.as_str(),
            number.get()
        )
    }
}

impl std::fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
