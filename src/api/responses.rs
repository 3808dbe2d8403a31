//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::CountdownSnapshot;

/// Acknowledgement response for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
        }
    }

    /// Create an accepted response
    pub fn accepted(message: String) -> Self {
        Self::new("accepted".to_string(), message)
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self::new("error".to_string(), message)
    }
}

/// One campaign's countdown, stamped with the read time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownResponse {
    #[serde(flatten)]
    pub countdown: CountdownSnapshot,
    pub as_of: DateTime<Utc>,
}

impl CountdownResponse {
    pub fn new(countdown: CountdownSnapshot) -> Self {
        Self {
            countdown,
            as_of: Utc::now(),
        }
    }
}

/// Service status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub campaigns_tracked: usize,
    pub backend_url: String,
    pub fallback_minutes: u32,
    pub last_poll_at: Option<DateTime<Utc>>,
    pub last_poll_error: Option<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
