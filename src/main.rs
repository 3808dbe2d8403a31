//! Campaign Countdown - a countdown service for time-limited posting campaigns
//!
//! This is the main entry point for the campaign-countdown application.

use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tracing::{info, warn};

use campaign_countdown::{
    api::create_router,
    backend::BackendClient,
    config::Config,
    state::AppState,
    tasks::{campaign_poll_task, countdown_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "campaign_countdown={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting campaign-countdown v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, backend={}, fallback={}min, poll={}s",
        config.host, config.port, config.backend_url, config.fallback_minutes, config.poll_interval
    );
    if config.campaigns.is_empty() {
        info!("Tracking every campaign the backend reports");
    } else {
        info!("Tracking pinned campaigns: {:?}", config.campaigns);
    }

    let client = BackendClient::new(&config.backend_url)?;

    // An unreachable backend at boot is not fatal; the poll task keeps
    // retrying and campaigns show the full allotment until state arrives.
    if let Err(e) = client.check_reachable().await {
        warn!("{:#}", e);
    }

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.backend_url.clone(),
        config.campaigns.clone(),
        config.fallback_minutes,
    ));

    // Start the campaign poll background task
    let poll_state = Arc::clone(&state);
    let poll_client = client.clone();
    let poll_interval = Duration::from_secs(config.poll_interval);
    tokio::spawn(async move {
        campaign_poll_task(poll_state, poll_client, poll_interval).await;
    });

    // Start the countdown ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /campaigns                         - All countdown snapshots");
    info!("  GET  /campaigns/:campaign_id/countdown  - One campaign's countdown");
    info!("  POST /campaigns/:campaign_id/refresh    - Request an immediate re-poll");
    info!("  GET  /status                            - Service status");
    info!("  GET  /health                            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
