// src/fetch/mod.rs

use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::{HttpConfig, RetryPolicy};
use crate::error::{PipelineError, Result};
use crate::types::RawSnapshot;

/// HTTP retrieval of source pages with fixed-delay retry.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(http: &HttpConfig, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http.user_agent.as_str())
            .timeout(Duration::from_secs(http.timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()
            .map_err(PipelineError::HttpClient)?;
        Ok(Self { client, retry })
    }

    /// GET `url` and wrap the body as the snapshot of `source_id`.
    ///
    /// Non-2xx statuses and transport errors are retried `max_retries` times
    /// with a fixed delay; an unparsable URL fails immediately.
    #[instrument(level = "info", skip(self, retrieved_at), fields(source = %source_id))]
    pub async fn fetch(
        &self,
        source_id: &str,
        url: &str,
        retrieved_at: NaiveDate,
    ) -> Result<RawSnapshot> {
        let parsed = Url::parse(url).map_err(|e| PipelineError::FetchFailed {
            url: url.to_string(),
            attempts: 0,
            reason: format!("invalid URL: {}", e),
        })?;

        let attempts = self.retry.max_retries + 1;
        let mut attempt = 0;
        let content = loop {
            attempt += 1;
            match self.get_text(&parsed).await {
                Ok(text) => break text,
                Err(reason) if attempt < attempts => {
                    warn!(%url, attempt, delay_ms = self.retry.delay_ms, error = %reason, "retrying");
                    sleep(self.retry.delay()).await;
                }
                Err(reason) => {
                    error!(%url, attempt, error = %reason, "exhausted retries");
                    return Err(PipelineError::FetchFailed {
                        url: url.to_string(),
                        attempts: attempt,
                        reason,
                    });
                }
            }
        };

        info!(%url, attempt, bytes = content.len(), "fetched");
        Ok(RawSnapshot {
            source_id: source_id.to_string(),
            retrieved_at,
            content,
        })
    }

    async fn get_text(&self, url: &Url) -> std::result::Result<String, String> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("GET {} failed: {}", url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }
        resp.text()
            .await
            .map_err(|e| format!("reading body from {}: {}", url, e))
    }
}
