//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::countdown::CountdownCalculator;

use super::{CampaignState, CountdownSnapshot, Phase};

/// Shared state for the countdown service
#[derive(Debug)]
pub struct AppState {
    /// Per-campaign state, keyed by campaign id, refreshed by the poll task
    pub campaigns: Arc<Mutex<HashMap<String, CampaignState>>>,
    /// Campaign ids pinned on the command line; empty means track every
    /// community the backend reports
    pub tracked_ids: Vec<String>,
    /// Time limit applied when a campaign config omits one
    pub fallback_minutes: u32,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    pub backend_url: String,
    /// Poll-cycle tracking
    pub last_poll_at: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub last_poll_error: Arc<Mutex<Option<String>>>,
    /// Channel for on-demand refresh requests (campaign id)
    pub refresh_tx: broadcast::Sender<String>,
    /// Channel carrying the latest countdown snapshots
    pub snapshot_tx: watch::Sender<Vec<CountdownSnapshot>>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Vec<CountdownSnapshot>>,
}

impl AppState {
    /// Create a new AppState with empty campaign state
    pub fn new(
        port: u16,
        host: String,
        backend_url: String,
        tracked_ids: Vec<String>,
        fallback_minutes: u32,
    ) -> Self {
        let (refresh_tx, _) = broadcast::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());

        let campaigns = tracked_ids
            .iter()
            .map(|id| (id.clone(), CampaignState::new()))
            .collect();

        Self {
            campaigns: Arc::new(Mutex::new(campaigns)),
            tracked_ids,
            fallback_minutes,
            start_time: Instant::now(),
            port,
            host,
            backend_url,
            last_poll_at: Arc::new(Mutex::new(None)),
            last_poll_error: Arc::new(Mutex::new(None)),
            refresh_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Whether a campaign id should be tracked
    pub fn tracks(&self, campaign_id: &str) -> bool {
        self.tracked_ids.is_empty() || self.tracked_ids.iter().any(|id| id == campaign_id)
    }

    /// Ids of all campaigns currently held in state
    pub fn campaign_ids(&self) -> Result<Vec<String>, String> {
        let campaigns = self
            .campaigns
            .lock()
            .map_err(|e| format!("Failed to lock campaign state: {}", e))?;
        Ok(campaigns.keys().cloned().collect())
    }

    /// Get a copy of one campaign's state
    pub fn get_campaign(&self, campaign_id: &str) -> Result<Option<CampaignState>, String> {
        let campaigns = self
            .campaigns
            .lock()
            .map_err(|e| format!("Failed to lock campaign state: {}", e))?;
        Ok(campaigns.get(campaign_id).cloned())
    }

    /// Apply the result of a successful poll for one campaign
    pub fn apply_poll(
        &self,
        campaign_id: &str,
        name: Option<String>,
        time_limit_minutes: Option<u32>,
        last_post_at: Option<DateTime<Utc>>,
    ) -> Result<Phase, String> {
        let mut campaigns = self
            .campaigns
            .lock()
            .map_err(|e| format!("Failed to lock campaign state: {}", e))?;

        let campaign = campaigns.entry(campaign_id.to_string()).or_default();
        let previous_phase = campaign.phase();
        let previous_post = campaign.last_post_at;
        campaign.record_poll(name, time_limit_minutes, last_post_at);
        let phase = campaign.phase();
        drop(campaigns);

        if previous_phase == Phase::NoPosts && phase == Phase::Counting {
            info!(
                "Campaign {} received its first post, countdown started",
                campaign_id
            );
        } else if previous_post.is_some() && last_post_at > previous_post {
            debug!(
                "Campaign {} received a new post, countdown restarted",
                campaign_id
            );
        }

        Ok(phase)
    }

    /// Record a completed poll cycle
    pub fn record_poll_success(&self) {
        if let Ok(mut last_poll) = self.last_poll_at.lock() {
            *last_poll = Some(Utc::now());
        }
        if let Ok(mut last_error) = self.last_poll_error.lock() {
            *last_error = None;
        }
    }

    /// Record a failed poll cycle; campaign state keeps its last known values
    pub fn record_poll_failure(&self, error: String) {
        warn!("Poll cycle failed, keeping last known state: {}", error);
        if let Ok(mut last_error) = self.last_poll_error.lock() {
            *last_error = Some(error);
        }
    }

    /// Get the last poll time and error, if any
    pub fn get_poll_status(&self) -> (Option<DateTime<Utc>>, Option<String>) {
        let last_poll_at = self.last_poll_at.lock().ok().and_then(|t| *t);
        let last_poll_error = self.last_poll_error.lock().ok().and_then(|e| e.clone());
        (last_poll_at, last_poll_error)
    }

    /// Derive a fresh snapshot for every campaign from the wall clock
    pub fn build_snapshots(&self) -> Result<Vec<CountdownSnapshot>, String> {
        let campaigns = self
            .campaigns
            .lock()
            .map_err(|e| format!("Failed to lock campaign state: {}", e))?;

        let mut snapshots: Vec<CountdownSnapshot> = campaigns
            .iter()
            .map(|(id, campaign)| {
                let calculator = CountdownCalculator::from_time_limit(
                    campaign.time_limit_minutes,
                    self.fallback_minutes,
                );
                let remaining = calculator.remaining_since(campaign.last_post_at);

                CountdownSnapshot {
                    campaign_id: id.clone(),
                    name: campaign.name.clone(),
                    phase: campaign.phase(),
                    remaining_seconds: remaining.total_seconds(),
                    display: remaining.to_string(),
                    time_limit_minutes: campaign
                        .time_limit_minutes
                        .unwrap_or(self.fallback_minutes),
                    last_post_at: campaign.last_post_at,
                }
            })
            .collect();
        snapshots.sort_by(|a, b| a.campaign_id.cmp(&b.campaign_id));

        Ok(snapshots)
    }

    /// Publish a snapshot vector to watchers
    pub fn publish_snapshots(&self, snapshots: Vec<CountdownSnapshot>) {
        if let Err(e) = self.snapshot_tx.send(snapshots) {
            warn!("Failed to publish countdown snapshots: {}", e);
        }
    }

    /// Latest published snapshots
    pub fn snapshots(&self) -> Vec<CountdownSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Ask the poll task to re-poll one campaign immediately
    pub fn request_refresh(&self, campaign_id: &str) -> Result<(), String> {
        self.refresh_tx
            .send(campaign_id.to_string())
            .map(|_| ())
            .map_err(|e| format!("Failed to request refresh: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn state_with(tracked: Vec<String>) -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            "http://localhost:9".to_string(),
            tracked,
            180,
        )
    }

    #[test]
    fn pinned_ids_restrict_tracking() {
        let state = state_with(vec!["a".to_string()]);
        assert!(state.tracks("a"));
        assert!(!state.tracks("b"));

        let open = state_with(Vec::new());
        assert!(open.tracks("anything"));
    }

    #[test]
    fn snapshot_uses_fallback_when_limit_absent() {
        let state = state_with(vec!["c1".to_string()]);
        state.apply_poll("c1", None, None, None).unwrap();

        let snapshots = state.build_snapshots().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].phase, Phase::NoPosts);
        assert_eq!(snapshots[0].time_limit_minutes, 180);
        assert_eq!(snapshots[0].remaining_seconds, 180 * 60);
        assert_eq!(snapshots[0].display, "03:00:00");
    }

    #[test]
    fn expired_campaign_rests_at_zero() {
        let state = state_with(vec!["c1".to_string()]);
        let old_post = Utc::now() - Duration::hours(5);
        state
            .apply_poll("c1", Some("orca".to_string()), Some(60), Some(old_post))
            .unwrap();

        let snapshots = state.build_snapshots().unwrap();
        assert_eq!(snapshots[0].phase, Phase::Counting);
        assert_eq!(snapshots[0].remaining_seconds, 0);
        assert_eq!(snapshots[0].display, "00:00:00");
    }

    #[test]
    fn poll_discovers_unpinned_campaigns() {
        let state = state_with(Vec::new());
        state.apply_poll("new-id", None, Some(120), None).unwrap();
        assert_eq!(state.campaign_ids().unwrap(), vec!["new-id".to_string()]);
    }

    #[test]
    fn snapshots_are_sorted_by_campaign_id() {
        let state = state_with(Vec::new());
        state.apply_poll("b", None, None, None).unwrap();
        state.apply_poll("a", None, None, None).unwrap();

        let snapshots = state.build_snapshots().unwrap();
        let ids: Vec<&str> = snapshots.iter().map(|s| s.campaign_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
