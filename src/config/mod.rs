//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.review-nudge.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `REVIEW_NUDGE_TOKEN`, `REVIEW_NUDGE_REPO`,
//!    and so on, plus `GITHUB_TOKEN` as a token fallback
//! 4. **Command-line arguments** – `--token`/`-t`, `--repo`/`-r`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! repo = "oppia/oppia"
//! category = "Reviews"
//! title = "Pending review notifications"
//! max_wait_hours = 48
//! template_path = ".github/PENDING_REVIEW_NOTIFICATION_TEMPLATE.md"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ReminderError;
use crate::github::locator::{DEFAULT_API_BASE, PersonalAccessToken, RepositoryLocator};
use crate::notify::DEFAULT_TEMPLATE_PATH;
use crate::run::ReminderSettings;

/// Reminder configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use review_nudge::ReminderConfig;
///
/// let config = ReminderConfig::load().expect("failed to load configuration");
/// let settings = config.into_settings().expect("incomplete configuration");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REVIEW_NUDGE",
    discovery(
        dotfile_name = ".review-nudge.toml",
        config_file_name = "review-nudge.toml",
        app_name = "review-nudge"
    )
)]
pub struct ReminderConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REVIEW_NUDGE_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository to scan, as `org/repo`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Discussion category holding the reminder discussion.
    #[ortho_config(cli_short = 'c')]
    pub category: Option<String>,

    /// Exact title of the reminder discussion.
    #[ortho_config(cli_short = 'T')]
    pub title: Option<String>,

    /// Hours a reviewer may wait before being reminded.
    #[ortho_config(cli_short = 'w')]
    pub max_wait_hours: Option<u32>,

    /// Logs progress at info level.
    ///
    /// Booleans are not read from the environment; use the CLI flag or the
    /// config file.
    #[ortho_config(cli_short = 'v')]
    pub verbose: bool,

    /// Markdown template for reminder comments.
    #[ortho_config(cli_short = 'p')]
    pub template_path: String,

    /// GitHub API base URL, for GitHub Enterprise Server.
    #[ortho_config(cli_short = 'a')]
    pub api_url: String,

    /// Renders and logs reminders without touching the discussion.
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            category: None,
            title: None,
            max_wait_hours: None,
            verbose: false,
            template_path: DEFAULT_TEMPLATE_PATH.to_owned(),
            api_url: DEFAULT_API_BASE.to_owned(),
            dry_run: false,
        }
    }
}

impl ReminderConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::MissingToken`] when no token source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, ReminderError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ReminderError::MissingToken)
    }

    /// Validates the configuration and converts it into run settings.
    ///
    /// Nothing here touches the network.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Configuration`] naming every missing flag,
    /// [`ReminderError::InvalidRepository`] for a malformed `--repo`,
    /// [`ReminderError::InvalidUrl`] for a bad `--api-url`, and
    /// [`ReminderError::MissingToken`] when no token is available.
    pub fn into_settings(self) -> Result<ReminderSettings, ReminderError> {
        let missing = self.missing_options();
        let token_value = self.resolve_token();

        let (Some(repo), Some(category), Some(title), Some(max_wait_hours)) =
            (self.repo, self.category, self.title, self.max_wait_hours)
        else {
            return Err(ReminderError::Configuration {
                message: format!("missing required options: {}", missing.join(", ")),
            });
        };
        let token = PersonalAccessToken::new(token_value?)?;
        let locator = RepositoryLocator::from_slug(&repo)?.with_api_base(&self.api_url)?;

        Ok(ReminderSettings {
            token,
            locator,
            category,
            title,
            max_wait_hours,
            template_path: Utf8PathBuf::from(self.template_path),
            dry_run: self.dry_run,
        })
    }

    fn missing_options(&self) -> Vec<&'static str> {
        [
            ("--repo", self.repo.is_none()),
            ("--category", self.category.is_none()),
            ("--title", self.title.is_none()),
            ("--max-wait-hours", self.max_wait_hours.is_none()),
        ]
        .into_iter()
        .filter_map(|(flag, absent)| absent.then_some(flag))
        .collect()
    }
}
