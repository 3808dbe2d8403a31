//! Campaign polling background task

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::{
    backend::{BackendClient, Community},
    state::AppState,
};

/// Background task that refreshes campaign config and post history from the
/// backend on a fixed interval, and on demand via the refresh channel
pub async fn campaign_poll_task(
    state: Arc<AppState>,
    client: BackendClient,
    poll_interval: Duration,
) {
    info!("Starting campaign poll task (every {:?})", poll_interval);

    let mut refresh_rx = state.refresh_tx.subscribe();
    let mut interval = interval(poll_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                poll_cycle(&state, &client).await;
            }

            request = refresh_rx.recv() => {
                match request {
                    Ok(campaign_id) => {
                        info!("On-demand refresh requested for campaign {}", campaign_id);
                        if let Err(e) = poll_one(&state, &client, &campaign_id).await {
                            state.record_poll_failure(
                                format!("Refresh of {} failed: {:#}", campaign_id, e),
                            );
                        }
                    }
                    Err(e) => {
                        error!("Error receiving refresh request: {}", e);
                    }
                }
            }
        }
    }
}

/// Run one full poll cycle over every tracked campaign
async fn poll_cycle(state: &AppState, client: &BackendClient) {
    let communities = match client.fetch_communities().await {
        Ok(communities) => communities,
        Err(e) => {
            state.record_poll_failure(format!("Community fetch failed: {:#}", e));
            return;
        }
    };

    let mut any_failed = false;
    for community in communities.iter().filter(|c| state.tracks(&c.id)) {
        if let Err(e) = apply_community(state, client, community).await {
            state.record_poll_failure(format!("Poll of {} failed: {:#}", community.id, e));
            any_failed = true;
        }
    }

    // Pinned campaigns the backend no longer lists keep their last state
    for pinned in &state.tracked_ids {
        if !communities.iter().any(|c| &c.id == pinned) {
            debug!("Pinned campaign {} not present in backend listing", pinned);
        }
    }

    if !any_failed {
        state.record_poll_success();
    }
}

/// Re-poll a single campaign by id
async fn poll_one(state: &AppState, client: &BackendClient, campaign_id: &str) -> Result<()> {
    let Some(community) = client.fetch_community(campaign_id).await? else {
        anyhow::bail!("campaign {} not found on backend", campaign_id);
    };
    apply_community(state, client, &community).await
}

/// Fetch a community's posts and fold config plus latest post into state
async fn apply_community(
    state: &AppState,
    client: &BackendClient,
    community: &Community,
) -> Result<()> {
    let contents = client.fetch_contents(&community.id).await?;

    // The backend usually returns newest-first; take the maximum timestamp
    // so the ordering is not load-bearing.
    let last_post_at = contents.iter().map(|c| c.created_at).max();

    debug!(
        "Polled campaign {}: time_limit={:?}min, posts={}, last_post={:?}",
        community.id,
        community.time_limit,
        contents.len(),
        last_post_at
    );

    state
        .apply_poll(
            &community.id,
            Some(community.name.clone()),
            community.time_limit,
            last_post_at,
        )
        .map_err(anyhow::Error::msg)?;

    Ok(())
}
