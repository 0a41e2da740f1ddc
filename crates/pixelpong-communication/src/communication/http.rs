//! HTTP implementation of [`GridService`]
//!
//! Talks to the generator's REST API: `configure/` and `generate/` are POSTs
//! with a `{"m","n"}` body, `status/` and `ui/` are GETs with `m` and `n`
//! query parameters.

use super::wire::{self, GridRequest};
use super::{GridService, StatusReport};
use async_trait::async_trait;
use pixelpong_core::{Cell, GridConfig, TransportError};
use std::time::Duration;

const CONFIGURE: &str = "configure";
const GENERATE: &str = "generate";
const STATUS: &str = "status";
const CONTENT: &str = "ui";

/// Grid service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpGridService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpGridService {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request {
                endpoint: base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// API root without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/", self.base_url, endpoint)
    }

    fn map_error(&self, endpoint: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_decode() {
            TransportError::malformed(endpoint, err.to_string())
        } else {
            TransportError::Request {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                endpoint: endpoint.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(endpoint, e))?;
        tracing::trace!("{} answered with {} bytes", endpoint, body.len());
        Ok(body.to_vec())
    }

    async fn post(&self, endpoint: &str, config: GridConfig) -> Result<(), TransportError> {
        let request = self
            .client
            .post(self.url(endpoint))
            .json(&GridRequest::from(config));
        self.send(endpoint, request).await.map(|_| ())
    }

    async fn get(&self, endpoint: &str, config: GridConfig) -> Result<Vec<u8>, TransportError> {
        let request = self
            .client
            .get(self.url(endpoint))
            .query(&[("m", config.rows), ("n", config.cols)]);
        self.send(endpoint, request).await
    }
}

#[async_trait]
impl GridService for HttpGridService {
    async fn configure(&self, config: GridConfig) -> Result<(), TransportError> {
        self.post(CONFIGURE, config).await
    }

    async fn generate(&self, config: GridConfig) -> Result<(), TransportError> {
        self.post(GENERATE, config).await
    }

    async fn status(&self, config: GridConfig) -> Result<StatusReport, TransportError> {
        let body = self.get(STATUS, config).await?;
        wire::decode_status(STATUS, &body)
    }

    async fn content(&self, config: GridConfig) -> Result<Vec<Cell>, TransportError> {
        let body = self.get(CONTENT, config).await?;
        wire::decode_content(CONTENT, &body)
    }
}
