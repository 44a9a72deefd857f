//! HTTP transport for the benefits backend.

use crate::catalog::error::ApiError;
use crate::catalog::models::{Benefit, CategoriesEnvelope, PageEnvelope};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Safety cap on catalog page fetches.
const MAX_CATALOG_PAGES: u32 = 50;

/// Trait for fetching catalog data - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full benefit catalog.
    async fn catalog(&self) -> Result<Vec<Benefit>, ApiError>;

    /// Fetches a single benefit by id.
    async fn benefit(&self, id: &str) -> Result<Benefit, ApiError>;

    /// Fetches the category vocabulary.
    async fn categories(&self) -> Result<Vec<String>, ApiError>;
}

/// Backend client over reqwest with retry/backoff for transient faults.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    fetch_limit: u32,
    retries: u32,
    retry_delay_ms: u64,
    retry_jitter_ms: u64,
}

impl HttpCatalog {
    /// Creates a new client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit.max(1),
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
            retry_jitter_ms: config.retry_jitter_ms,
        })
    }

    /// Performs a GET, retrying server errors with backoff, and decodes the
    /// body as JSON. `resource` labels 404s for the error message.
    async fn get_json(&self, url: &str, resource: &str) -> Result<Value, ApiError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_once(url, resource).await {
                Err(err @ ApiError::Server(_)) if attempt <= self.retries => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        "{} (attempt {}/{}), retrying in {}ms",
                        err,
                        attempt,
                        self.retries + 1,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    async fn get_once(&self, url: &str, resource: &str) -> Result<Value, ApiError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(ApiError::from_status(status.as_u16(), message, resource));
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    /// Linear backoff with jitter so retries from concurrent invocations
    /// don't land in lockstep.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let jitter = if self.retry_jitter_ms > 0 {
            rand::rng().random_range(0..=self.retry_jitter_ms)
        } else {
            0
        };
        Duration::from_millis(self.retry_delay_ms * attempt as u64 + jitter)
    }

    /// Splits a `success: false` body into the taxonomy.
    fn envelope_failure(value: &Value, resource: &str) -> ApiError {
        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("backend reported failure without a message");
        if message.to_lowercase().contains("not found") {
            ApiError::NotFound { resource: resource.to_string() }
        } else {
            ApiError::InvalidResponse(message.to_string())
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn catalog(&self) -> Result<Vec<Benefit>, ApiError> {
        info!("Fetching catalog from {}", self.base_url);

        let mut all = Vec::new();
        let mut page = 1;

        // The backend pages its raw listing; pull until every record is local
        loop {
            let url =
                format!("{}/api/benefits?page={}&limit={}", self.base_url, page, self.fetch_limit);
            let value = self.get_json(&url, "benefits").await?;

            if value.get("success").and_then(Value::as_bool) != Some(true) {
                return Err(Self::envelope_failure(&value, "benefits"));
            }

            let envelope: PageEnvelope = serde_json::from_value(value)
                .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;

            debug!("Page {} returned {} of {} records", page, envelope.data.len(), envelope.total);

            let empty_page = envelope.data.is_empty();
            let total = envelope.total;
            all.extend(envelope.data);

            if all.len() >= total || empty_page || page >= MAX_CATALOG_PAGES {
                break;
            }
            page += 1;
        }

        info!("Catalog holds {} records", all.len());
        Ok(all)
    }

    async fn benefit(&self, id: &str) -> Result<Benefit, ApiError> {
        let resource = format!("Benefit {}", id);
        let url = format!("{}/api/benefits/{}", self.base_url, urlencoding::encode(id));

        info!("Fetching benefit: {}", id);
        let value = self.get_json(&url, &resource).await?;

        if value.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(Self::envelope_failure(&value, &resource));
        }

        let benefit: Benefit = value
            .get("data")
            .cloned()
            .ok_or_else(|| ApiError::InvalidResponse("missing data field".to_string()))
            .and_then(|data| {
                serde_json::from_value(data).map_err(|err| ApiError::InvalidResponse(err.to_string()))
            })?;

        Ok(benefit)
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/api/benefits/categories", self.base_url);

        info!("Fetching categories");
        let value = self.get_json(&url, "categories").await?;

        if value.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(Self::envelope_failure(&value, "categories"));
        }

        let envelope: CategoriesEnvelope = serde_json::from_value(value)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;

        Ok(envelope.data)
    }
}
