use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::Snapshot;
use crate::services::watcher::SnapshotSource;

#[derive(Debug, Error)]
pub enum PortfolioApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode portfolio document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the ICODrops portfolio-share endpoint. All failures are
/// transient from the watcher's point of view; the next tick retries.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: Client,
    url: String,
}

impl PortfolioClient {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }

    /// Fetch the current portfolio document from the share endpoint.
    pub async fn fetch_portfolio(&self) -> Result<Snapshot, PortfolioApiError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        let snapshot: Snapshot = serde_json::from_str(&body)?;

        tracing::debug!(
            positions = snapshot.positions.len(),
            "Fetched portfolio snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotSource for PortfolioClient {
    async fn fetch(&self) -> anyhow::Result<Snapshot> {
        Ok(self.fetch_portfolio().await?)
    }
}
