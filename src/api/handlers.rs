//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, CountdownSnapshot};

use super::responses::{ApiResponse, CountdownResponse, HealthResponse, StatusResponse};

/// Handle GET /campaigns - All current countdown snapshots
pub async fn list_campaigns_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<CountdownSnapshot>> {
    Json(state.snapshots())
}

/// Handle GET /campaigns/:id/countdown - One campaign's countdown
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CountdownResponse>, StatusCode> {
    let snapshot = state
        .snapshots()
        .into_iter()
        .find(|s| s.campaign_id == campaign_id);

    match snapshot {
        Some(snapshot) => Ok(Json(CountdownResponse::new(snapshot))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Handle POST /campaigns/:id/refresh - Request an immediate re-poll
pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if !state.tracks(&campaign_id) {
        return Err(StatusCode::NOT_FOUND);
    }

    match state.request_refresh(&campaign_id) {
        Ok(()) => {
            info!("Refresh endpoint called for campaign {}", campaign_id);
            Ok(Json(ApiResponse::accepted(format!(
                "Refresh requested for campaign {}",
                campaign_id
            ))))
        }
        Err(e) => {
            error!("Failed to request refresh: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current service status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let campaign_ids = match state.campaign_ids() {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to get campaign state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_poll_at, last_poll_error) = state.get_poll_status();

    Ok(Json(StatusResponse {
        campaigns_tracked: campaign_ids.len(),
        backend_url: state.backend_url.clone(),
        fallback_minutes: state.fallback_minutes,
        last_poll_at,
        last_poll_error,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
