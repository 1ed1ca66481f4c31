//! Process-wide `tracing` subscriber for the CLI.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level used when `RUST_LOG` is unset and `--verbose` is given.
pub const VERBOSE_LEVEL: &str = "info";

/// Level used when `RUST_LOG` is unset and `--verbose` is not given.
pub const QUIET_LEVEL: &str = "warn";

/// Builds the log filter: `RUST_LOG` when set and valid, otherwise the level
/// selected by `verbose`.
#[must_use]
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose))
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { VERBOSE_LEVEL } else { QUIET_LEVEL })
}

/// Installs a formatting subscriber that writes to stderr.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(verbose: bool) {
    let installed = tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::log_filter;

    #[rstest]
    #[case::verbose(true, "info")]
    #[case::quiet(false, "warn")]
    fn verbosity_selects_default_level(#[case] verbose: bool, #[case] expected: &str) {
        let _guard = env_lock::lock_env([("RUST_LOG", None::<&str>)]);

        assert_eq!(log_filter(verbose).to_string(), expected);
    }

    #[rstest]
    fn rust_log_overrides_verbosity() {
        let _guard = env_lock::lock_env([("RUST_LOG", Some("review_nudge=debug"))]);

        assert_eq!(log_filter(false).to_string(), "review_nudge=debug");
    }
}
