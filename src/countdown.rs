//! Remaining-time derivation for campaign countdowns
//!
//! The calculator is pure: it converts an allotted duration and the timestamp
//! of the most recent qualifying post into a non-negative remaining time.
//! All mutable state (campaign config, post history, intervals) lives in the
//! polling and ticking layers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clock-face parts of a countdown value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeParts {
    pub const ZERO: TimeParts = TimeParts {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Total whole seconds represented by these parts
    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Check whether the countdown has run out
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for TimeParts {
    /// Renders `HH:MM:SS`, each field zero-padded to two digits.
    /// The hours field grows past two digits rather than truncating.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Split a whole-second count into hours, minutes and seconds
pub fn seconds_to_parts(total_seconds: u64) -> TimeParts {
    TimeParts {
        hours: total_seconds / 3600,
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
    }
}

/// Per-campaign countdown calculator
///
/// Holds the campaign's allotted duration so that call sites pass explicit
/// configuration instead of reading ambient constants. A campaign without a
/// configured time limit gets the fallback via [`from_time_limit`].
///
/// [`from_time_limit`]: CountdownCalculator::from_time_limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownCalculator {
    allotted_seconds: u64,
}

impl CountdownCalculator {
    /// Create a calculator with the full allotment in seconds
    pub fn new(allotted_seconds: u64) -> Self {
        Self { allotted_seconds }
    }

    /// Create a calculator from a campaign's time limit in minutes,
    /// applying the fallback when the campaign config omits one
    pub fn from_time_limit(time_limit_minutes: Option<u32>, fallback_minutes: u32) -> Self {
        let minutes = time_limit_minutes.unwrap_or(fallback_minutes);
        Self::new(u64::from(minutes) * 60)
    }

    /// The configured allotment in seconds
    pub fn allotted_seconds(&self) -> u64 {
        self.allotted_seconds
    }

    /// Remaining time before any post exists: the full allotment
    pub fn initial_remaining(&self) -> TimeParts {
        seconds_to_parts(self.allotted_seconds)
    }

    /// Remaining time at an explicit instant
    ///
    /// With no last post the countdown has not started and the full allotment
    /// remains. Otherwise the elapsed time since the last post is floored to
    /// whole seconds and subtracted, clamping at zero. A last post ahead of
    /// `now` (clock skew between backend and this host) yields a negative
    /// elapsed value and a remaining time above the allotment; the surplus is
    /// kept rather than clamped.
    pub fn remaining_at(
        &self,
        last_post_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> TimeParts {
        let Some(last_post) = last_post_at else {
            return self.initial_remaining();
        };

        let elapsed_ms = now.signed_duration_since(last_post).num_milliseconds();
        let elapsed_seconds = elapsed_ms.div_euclid(1000);

        let remaining = self.allotted_seconds as i64 - elapsed_seconds;
        if remaining <= 0 {
            TimeParts::ZERO
        } else {
            seconds_to_parts(remaining as u64)
        }
    }

    /// Remaining time right now, reading the wall clock once
    pub fn remaining_since(&self, last_post_at: Option<DateTime<Utc>>) -> TimeParts {
        self.remaining_at(last_post_at, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-05-14T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn parts_reassemble_to_input() {
        for s in [0u64, 1, 59, 60, 61, 3599, 3600, 3661, 86_399, 86_400, 123_456_789] {
            let parts = seconds_to_parts(s);
            assert_eq!(parts.total_seconds(), s);
            assert!(parts.minutes < 60);
            assert!(parts.seconds < 60);
        }
    }

    #[test]
    fn zero_seconds_is_all_zeros() {
        assert_eq!(seconds_to_parts(0), TimeParts::ZERO);
        assert_eq!(TimeParts::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn one_hour_one_minute_one_second() {
        let parts = seconds_to_parts(3661);
        assert_eq!(
            parts,
            TimeParts {
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(parts.to_string(), "01:01:01");
    }

    #[test]
    fn hours_field_is_not_truncated() {
        let parts = seconds_to_parts(100 * 3600);
        assert_eq!(parts.to_string(), "100:00:00");
    }

    #[test]
    fn no_post_yields_full_allotment() {
        let calc = CountdownCalculator::new(7200);
        assert_eq!(
            calc.remaining_at(None, now()),
            TimeParts {
                hours: 2,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn elapsed_beyond_allotment_clamps_to_zero() {
        let calc = CountdownCalculator::new(120);
        let last_post = now() - Duration::seconds(150);
        assert_eq!(calc.remaining_at(Some(last_post), now()), TimeParts::ZERO);
    }

    #[test]
    fn elapsed_within_allotment_counts_down() {
        let calc = CountdownCalculator::new(120);
        let last_post = now() - Duration::seconds(30);
        assert_eq!(
            calc.remaining_at(Some(last_post), now()),
            TimeParts {
                hours: 0,
                minutes: 1,
                seconds: 30
            }
        );
    }

    #[test]
    fn sub_second_elapsed_is_floored() {
        let calc = CountdownCalculator::new(120);
        let last_post = now() - Duration::milliseconds(1999);
        // 1.999s elapsed floors to 1s
        assert_eq!(calc.remaining_at(Some(last_post), now()).total_seconds(), 119);
    }

    #[test]
    fn future_post_exceeds_allotment() {
        let calc = CountdownCalculator::new(120);
        let last_post = now() + Duration::seconds(60);
        let remaining = calc.remaining_at(Some(last_post), now());
        assert_eq!(remaining.total_seconds(), 180);
    }

    #[test]
    fn remaining_is_monotonically_non_increasing() {
        let calc = CountdownCalculator::new(600);
        let last_post = now() - Duration::seconds(100);
        let mut previous = u64::MAX;
        for offset in 0..20 {
            let at = now() + Duration::seconds(offset);
            let remaining = calc.remaining_at(Some(last_post), at).total_seconds();
            assert!(remaining <= previous);
            previous = remaining;
        }
    }

    #[test]
    fn format_is_idempotent() {
        let parts = seconds_to_parts(4521);
        assert_eq!(parts.to_string(), parts.to_string());
    }

    #[test]
    fn fallback_applies_only_when_limit_is_absent() {
        let configured = CountdownCalculator::from_time_limit(Some(30), 180);
        assert_eq!(configured.allotted_seconds(), 1800);

        let fallback = CountdownCalculator::from_time_limit(None, 180);
        assert_eq!(fallback.allotted_seconds(), 10_800);
    }
}
