//! Human-readable review waiting times.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Whole days and remaining whole hours a reviewer has been waiting.
///
/// Minutes and seconds are truncated. An assignment time in the future
/// (clock skew between GitHub and the runner) counts as no wait at all.
///
/// # Example
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use review_nudge::github::models::WaitingTime;
///
/// let now = Utc::now();
/// let waited = WaitingTime::between(now - TimeDelta::hours(25), now);
/// assert_eq!(waited.to_string(), "1 day, 1 hour");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingTime {
    days: i64,
    hours: i64,
}

impl WaitingTime {
    /// Measures the wait from `assigned_at` until `now`.
    #[must_use]
    pub fn between(assigned_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_delta(now.signed_duration_since(assigned_at))
    }

    /// Splits an elapsed duration into days and hours.
    #[must_use]
    pub fn from_delta(delta: TimeDelta) -> Self {
        let elapsed = delta.max(TimeDelta::zero());
        let days = elapsed.num_days();
        let hours = (elapsed - TimeDelta::days(days)).num_hours();
        Self { days, hours }
    }

    /// Whole days waited.
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Whole hours waited beyond [`Self::days`].
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.hours
    }
}

fn unit(count: i64, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

impl fmt::Display for WaitingTime {
    /// Formats as `"<d> day(s), <h> hour(s)"`, omitting zero components.
    /// A wait under one hour renders as the empty string.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(2);
        if self.days != 0 {
            parts.push(unit(self.days, "day"));
        }
        if self.hours != 0 {
            parts.push(unit(self.hours, "hour"));
        }
        formatter.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use rstest::rstest;

    use super::WaitingTime;

    #[rstest]
    #[case::two_days(TimeDelta::days(2), "2 days")]
    #[case::one_hour(TimeDelta::hours(1), "1 hour")]
    #[case::one_day_one_hour(TimeDelta::hours(25), "1 day, 1 hour")]
    #[case::plural_both(TimeDelta::hours(56), "2 days, 8 hours")]
    #[case::minutes_truncated(TimeDelta::minutes(179), "2 hours")]
    #[case::under_an_hour(TimeDelta::minutes(59), "")]
    #[case::nothing(TimeDelta::zero(), "")]
    fn formats_days_and_hours(#[case] delta: TimeDelta, #[case] expected: &str) {
        assert_eq!(WaitingTime::from_delta(delta).to_string(), expected);
    }

    #[rstest]
    fn measures_between_instants() {
        let assigned_at = Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        let now = assigned_at + TimeDelta::hours(49) + TimeDelta::minutes(30);

        let waited = WaitingTime::between(assigned_at, now);

        assert_eq!(waited.days(), 2);
        assert_eq!(waited.hours(), 1);
    }

    #[rstest]
    fn future_assignment_counts_as_no_wait() {
        let now = Utc::now();

        let waited = WaitingTime::between(now + TimeDelta::hours(3), now);

        assert_eq!(waited, WaitingTime::from_delta(TimeDelta::zero()));
    }
}
