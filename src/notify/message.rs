//! Reminder message rendering.
//!
//! A reminder is a user-supplied Markdown template with two placeholders,
//! `{{ username }}` and `{{ pr_list }}`, rendered through `minijinja`. The
//! posted body carries a hidden per-reviewer marker so a later run can find
//! and replace it.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use minijinja::{Environment, context};

use crate::github::error::ReminderError;
use crate::github::models::PullRequest;

/// Template location used when none is configured.
pub const DEFAULT_TEMPLATE_PATH: &str = ".github/PENDING_REVIEW_NOTIFICATION_TEMPLATE.md";

const MARKER_PREFIX: &str = "<!-- review-nudge:reviewer=";
const MARKER_SUFFIX: &str = " -->";

/// Hidden marker identifying the reviewer a reminder was written for.
///
/// # Example
///
/// ```
/// use review_nudge::notify::reminder_marker;
///
/// assert_eq!(reminder_marker("bob"), "<!-- review-nudge:reviewer=bob -->");
/// ```
#[must_use]
pub fn reminder_marker(username: &str) -> String {
    format!("{MARKER_PREFIX}{username}{MARKER_SUFFIX}")
}

/// Reviewer named by the last marker in `body`, if any.
#[must_use]
pub fn marked_reviewer(body: &str) -> Option<&str> {
    let (_, tail) = body.rsplit_once(MARKER_PREFIX)?;
    tail.split_once(MARKER_SUFFIX).map(|(username, _)| username)
}

/// Appends the reviewer's marker to a rendered message.
#[must_use]
pub fn with_marker(message: &str, username: &str) -> String {
    format!("{}\n\n{}", message.trim_end(), reminder_marker(username))
}

/// Formats one list entry per pull request, newline-joined:
/// `- [#<number>](<url>) [Waiting for the last <wait>]`.
///
/// # Errors
///
/// Returns [`ReminderError::UnresolvedAssignment`] when `username` is not
/// an assignee of a listed pull request or their assignment time is
/// unknown.
pub fn format_pr_list(
    username: &str,
    pull_requests: &[PullRequest],
    now: DateTime<Utc>,
) -> Result<String, ReminderError> {
    let entries = pull_requests
        .iter()
        .map(|pull_request| {
            let waiting = pull_request
                .assignee(username)
                .ok_or_else(|| ReminderError::UnresolvedAssignment {
                    username: username.to_owned(),
                })?
                .waiting_time_at(now)?;
            Ok(format!(
                "- [#{}]({}) [Waiting for the last {waiting}]",
                pull_request.number().get(),
                pull_request.url()
            ))
        })
        .collect::<Result<Vec<_>, ReminderError>>()?;
    Ok(entries.join("\n"))
}

/// Reads the template at `path`.
///
/// # Errors
///
/// Returns [`ReminderError::TemplateNotFound`] when the file or its
/// directory does not exist, and [`ReminderError::Io`] for other read
/// failures.
pub fn load_template(path: &Utf8Path) -> Result<String, ReminderError> {
    let not_found = || ReminderError::TemplateNotFound {
        path: path.to_string(),
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(not_found)?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            not_found()
        } else {
            ReminderError::Io {
                message: format!("failed to open template directory '{parent}': {error}"),
            }
        }
    })?;

    dir.read_to_string(file_name).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            not_found()
        } else {
            ReminderError::Io {
                message: format!("failed to read template '{path}': {error}"),
            }
        }
    })
}

/// Renders template text with `username` (prefixed with `@`) and the
/// pre-formatted `pr_list`.
///
/// # Errors
///
/// Returns [`ReminderError::Template`] if the template has syntax errors or
/// fails to render.
pub fn render_template(
    username: &str,
    pr_list: &str,
    template: &str,
) -> Result<String, ReminderError> {
    let mut env = Environment::new();

    // Output is Markdown, not HTML.
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.set_keep_trailing_newline(true);

    env.add_template("reminder", template)
        .map_err(|error| ReminderError::Template {
            message: format!("invalid template syntax: {error}"),
        })?;
    let tmpl = env
        .get_template("reminder")
        .map_err(|error| ReminderError::Template {
            message: format!("failed to retrieve template: {error}"),
        })?;

    tmpl.render(context! {
        username => format!("@{username}"),
        pr_list => pr_list,
    })
    .map_err(|error| ReminderError::Template {
        message: format!("template rendering failed: {error}"),
    })
}

/// Loads the template at `template_path` and renders it.
///
/// # Errors
///
/// Returns [`ReminderError::TemplateNotFound`] naming the path when the
/// template does not exist, or a rendering error from
/// [`render_template`].
pub fn render_message(
    username: &str,
    pr_list: &str,
    template_path: &Utf8Path,
) -> Result<String, ReminderError> {
    let template = load_template(template_path)?;
    render_template(username, pr_list, &template)
}
