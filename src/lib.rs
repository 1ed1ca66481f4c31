//! Review-nudge library crate: reminders for pull requests awaiting review.
//!
//! The library scans a repository's open pull requests, works out from each
//! pull request's timeline how long every assigned reviewer has been
//! waiting, and posts one reminder per overdue reviewer into a GitHub
//! Discussion, replacing the reminder it posted on the previous run.

pub mod config;
pub mod github;
pub mod logging;
pub mod notify;
pub mod review;
pub mod run;

pub use config::ReminderConfig;
pub use github::{
    DiscussionGateway, OctocrabGateway, PersonalAccessToken, PullRequest, PullRequestGateway,
    ReminderError, RepositoryLocator, WaitingTime,
};
pub use notify::NotificationPublisher;
pub use review::{PendingReviewScanner, ReviewerWaitIndex};
pub use run::{ReminderSettings, RunSummary, run, run_reminders};
