// src/client/mod.rs
// Transport seam and the retrying request client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::ShiftConfig;
use crate::error::OperationError;
use crate::types::{OperationOutcome, OperationRequest, RetryPolicy};

pub mod wire;

pub use wire::{WireRequest, WireResponse};

/// Failure to complete one request/response round trip. Distinct from a
/// service decline: the request may never have been delivered.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// One call to the remote service: deliver a request, get back either a
/// structured response or a transport error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: &WireRequest) -> Result<WireResponse, TransportError>;
}

/// reqwest-backed transport against the service's HTTP API.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ShiftConfig) -> Self {
        Self::new(
            &config.endpoint,
            Duration::from_secs(config.request_timeout),
            Duration::from_secs(config.connect_timeout),
        )
    }

    /// Ping /api/health. Advisory; the controller never calls this.
    pub async fn health(&self) -> Result<(), TransportError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let url = format!("{}/api/transform", self.base_url);
        debug!(url = %url, operation = %request.operation, "posting operation");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<WireResponse>()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

/// Issues the network call for one operation with bounded retry/backoff.
pub struct RequestClient {
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform up to `policy.max_attempts` round trips.
    ///
    /// Transport failures back off and retry; a structurally valid response
    /// ends the loop immediately whether the service honored the request or
    /// declined it. Only the final attempt's transport failure is surfaced.
    pub async fn send(&self, request: &OperationRequest, policy: &RetryPolicy) -> OperationOutcome {
        let wire = WireRequest::from_request(request);
        let mut backoff = policy.base_delay;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.transport.perform(&wire).await {
                Ok(response) => {
                    if !response.success {
                        debug!(
                            operation = %wire.operation,
                            "service declined the request, not retrying"
                        );
                    }
                    return response.into_outcome();
                }
                Err(e) => {
                    if attempt < policy.max_attempts {
                        warn!(
                            attempt,
                            max_attempts = policy.max_attempts,
                            error = %e,
                            "transport failure, retrying in {:?}...",
                            backoff
                        );
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                        continue;
                    }
                    error!(attempt, error = %e, "request failed after all attempts");
                    return OperationError::Transport(format!(
                        "request failed after {} attempts: {}",
                        attempt, e
                    ))
                    .into_outcome();
                }
            }
        }
    }
}
