use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::model::ComparisonSnapshot;

/// Delivers one [`ComparisonSnapshot`] as a single atomic value, or an
/// error the caller can surface as a retryable connection failure. The
/// core never patches a snapshot; a refetch replaces it wholesale.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<ComparisonSnapshot>;
}

/// Fetches the holdings-comparison payload from the backend's HTTP API.
///
/// Transient failures (connection errors, timeouts, 429/5xx) are
/// retried up to `retries` times; anything else, a malformed payload
/// included, fails immediately.
pub struct HttpSnapshotProvider {
    base_url: String,
    retries: usize,
    retry_delay_ms: u64,
}

/// The backend sits behind flaky upstream data sources and answers
/// 429/5xx while refreshing; those are worth another attempt, as is a
/// connection that never got through. A 4xx or an undecodable body
/// will not get better by asking again.
fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_connect() || err.is_timeout() {
        return true;
    }
    match err.status() {
        Some(status) => status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS,
        None => false,
    }
}

impl HttpSnapshotProvider {
    pub fn new(base_url: &str, retries: usize, retry_delay_ms: u64) -> Self {
        HttpSnapshotProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
            retry_delay_ms,
        }
    }

    async fn fetch_once(
        &self,
        client: &reqwest::Client,
        url: &str,
    ) -> Result<ComparisonSnapshot, reqwest::Error> {
        client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ComparisonSnapshot>()
            .await
    }
}

#[async_trait]
impl SnapshotProvider for HttpSnapshotProvider {
    #[instrument(name = "SnapshotFetch", skip(self))]
    async fn fetch_snapshot(&self) -> Result<ComparisonSnapshot> {
        let url = format!("{}/api/holdings/changes", self.base_url);
        debug!("Requesting holdings comparison from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("etfdiff/0.1")
            .build()?;

        let mut attempt = 1;
        let snapshot = loop {
            match self.fetch_once(&client, &url).await {
                Ok(snapshot) => break snapshot,
                Err(err) if attempt <= self.retries && is_transient(&err) => {
                    debug!(
                        "Attempt {}/{} failed: {}. Retrying...",
                        attempt,
                        self.retries + 1,
                        err
                    );
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(self.retry_delay_ms)).await;
                }
                Err(err) => {
                    return Err(anyhow!(
                        "Failed to fetch holdings changes from {}: {}",
                        url,
                        err
                    ));
                }
            }
        };

        debug!(
            funds = snapshot.fund_details.len(),
            "Received comparison snapshot"
        );
        Ok(snapshot)
    }
}
