//! reqwest-backed HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::domain::entities::{FetchedResponse, ImageKey};
use crate::domain::errors::FetchError;
use crate::domain::ports::HttpFetchPort;
use crate::infrastructure::config::HttpConfig;

/// Fetches image bytes over HTTP(S).
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher from the HTTP configuration.
    ///
    /// Without a configured timeout, fetch duration is bounded only by
    /// reqwest's own defaults.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| FetchError::ClientBuild {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetchPort for ReqwestFetcher {
    async fn fetch(&self, key: &ImageKey) -> Result<FetchedResponse, FetchError> {
        trace!(key = %key, "Sending request");

        let response = self
            .client
            .get(key.url().clone())
            .send()
            .await
            .map_err(|e| FetchError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            message: e.to_string(),
        })?;

        debug!(key = %key, size = body.len(), "Downloaded response body");

        Ok(FetchedResponse {
            body,
            status: status.as_u16(),
            content_type,
        })
    }
}
