//! Per-campaign countdown bookkeeping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown phase for a campaign
///
/// A campaign with no observed post history shows the full allotment; the
/// moment a post timestamp is observed the countdown counts from it. There is
/// no terminal phase: an expired countdown rests at zero until a newer post
/// restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoPosts,
    Counting,
}

/// Mutable per-campaign state, refreshed on every poll cycle
#[derive(Debug, Clone)]
pub struct CampaignState {
    /// Display name reported by the backend
    pub name: Option<String>,
    /// Configured time limit in minutes; absent means the fallback applies
    pub time_limit_minutes: Option<u32>,
    /// Timestamp of the most recent qualifying post, if any
    pub last_post_at: Option<DateTime<Utc>>,
    /// When this campaign was last successfully polled
    pub last_polled_at: Option<DateTime<Utc>>,
}

impl CampaignState {
    /// Create state for a campaign nothing is known about yet
    pub fn new() -> Self {
        Self {
            name: None,
            time_limit_minutes: None,
            last_post_at: None,
            last_polled_at: None,
        }
    }

    /// Current countdown phase
    pub fn phase(&self) -> Phase {
        if self.last_post_at.is_some() {
            Phase::Counting
        } else {
            Phase::NoPosts
        }
    }

    /// Apply the result of a successful poll cycle
    pub fn record_poll(
        &mut self,
        name: Option<String>,
        time_limit_minutes: Option<u32>,
        last_post_at: Option<DateTime<Utc>>,
    ) {
        self.name = name;
        self.time_limit_minutes = time_limit_minutes;
        self.last_post_at = last_post_at;
        self.last_polled_at = Some(Utc::now());
    }
}

impl Default for CampaignState {
    fn default() -> Self {
        Self::new()
    }
}

/// Display-ready countdown value for one campaign, published on every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub campaign_id: String,
    pub name: Option<String>,
    pub phase: Phase,
    pub remaining_seconds: u64,
    /// `HH:MM:SS` rendering of the remaining time
    pub display: String,
    /// Effective time limit with the fallback already applied
    pub time_limit_minutes: u32,
    pub last_post_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_campaign_has_no_posts() {
        let state = CampaignState::new();
        assert_eq!(state.phase(), Phase::NoPosts);
        assert!(state.last_polled_at.is_none());
    }

    #[test]
    fn observing_a_post_starts_counting() {
        let mut state = CampaignState::new();
        state.record_poll(Some("pulse".to_string()), Some(120), None);
        assert_eq!(state.phase(), Phase::NoPosts);

        let post_time = "2025-05-14T09:30:00Z".parse().unwrap();
        state.record_poll(Some("pulse".to_string()), Some(120), Some(post_time));
        assert_eq!(state.phase(), Phase::Counting);
        assert_eq!(state.last_post_at, Some(post_time));
    }

    #[test]
    fn phase_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Phase::NoPosts).unwrap(),
            "\"no_posts\""
        );
        assert_eq!(
            serde_json::to_string(&Phase::Counting).unwrap(),
            "\"counting\""
        );
    }
}
