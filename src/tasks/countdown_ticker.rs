//! Countdown ticker background task

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{error, info};

use crate::state::AppState;

/// Background task that rederives every campaign's remaining time once per
/// second and publishes the snapshots for the HTTP layer
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut interval = interval(Duration::from_secs(1));
    let mut previous_remaining: HashMap<String, u64> = HashMap::new();

    loop {
        interval.tick().await;

        let snapshots = match state.build_snapshots() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                error!("Failed to derive countdown snapshots: {}", e);
                continue;
            }
        };

        for snapshot in &snapshots {
            let was = previous_remaining
                .insert(snapshot.campaign_id.clone(), snapshot.remaining_seconds);

            // Log the expiry transition once; the value then rests at zero
            // until a new post restarts the countdown.
            if snapshot.remaining_seconds == 0 && was.is_some_and(|w| w > 0) {
                info!("Campaign {} countdown expired", snapshot.campaign_id);
            }
        }

        state.publish_snapshots(snapshots);
    }
}
