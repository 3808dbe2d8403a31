//! HTTP client for the campaign backend

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

use super::{Community, Content};

/// Thin client over the campaign backend's REST API
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // The backend sits behind a cache; requests carry a timestamp query
    // parameter to always hit the origin.
    fn cache_buster() -> String {
        Utc::now().timestamp_millis().to_string()
    }

    /// Fetch all communities
    pub async fn fetch_communities(&self) -> Result<Vec<Community>> {
        let url = format!("{}/api/communities", self.base_url);
        debug!("Fetching communities from {}", url);

        let communities = self
            .http
            .get(&url)
            .query(&[("t", Self::cache_buster())])
            .send()
            .await
            .context("Community request failed")?
            .error_for_status()
            .context("Community request returned an error status")?
            .json()
            .await
            .context("Failed to decode community list")?;

        Ok(communities)
    }

    /// Fetch one community by id
    ///
    /// The backend exposes no single-community endpoint; this fetches the
    /// list and picks the match.
    pub async fn fetch_community(&self, community_id: &str) -> Result<Option<Community>> {
        let communities = self.fetch_communities().await?;
        Ok(communities.into_iter().find(|c| c.id == community_id))
    }

    /// Fetch all posts for one community
    pub async fn fetch_contents(&self, community_id: &str) -> Result<Vec<Content>> {
        let url = format!("{}/api/communities/{}/contents", self.base_url, community_id);
        debug!("Fetching contents from {}", url);

        let contents = self
            .http
            .get(&url)
            .query(&[("t", Self::cache_buster())])
            .send()
            .await
            .context("Content request failed")?
            .error_for_status()
            .context("Content request returned an error status")?
            .json()
            .await
            .context("Failed to decode content list")?;

        Ok(contents)
    }

    /// Probe the backend once at startup
    pub async fn check_reachable(&self) -> Result<()> {
        let url = format!("{}/api/communities", self.base_url);
        self.http
            .get(&url)
            .query(&[("t", Self::cache_buster())])
            .send()
            .await
            .with_context(|| format!("Backend {} is not reachable", self.base_url))?
            .error_for_status()
            .with_context(|| format!("Backend {} returned an error status", self.base_url))?;

        Ok(())
    }
}
