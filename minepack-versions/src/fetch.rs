//! Fetching JSON documents from the remote catalog.

use crate::error::{Result, VersionsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Retrieves a JSON document by URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Fetch `url` and decode it into `T`.
pub async fn fetch_typed<T: DeserializeOwned>(fetch: &dyn Fetch, url: &str) -> Result<T> {
    let value = fetch.fetch_json(url).await?;
    serde_json::from_value(value).map_err(|e| VersionsError::decode(url, e))
}

/// [`Fetch`] over HTTP. Makes a single GET per call, with no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(concat!("minepack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| VersionsError::Client { source })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| VersionsError::http(url, e))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| VersionsError::http(url, e))
    }
}
