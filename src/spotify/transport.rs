//! Remote metadata transport boundary.
//!
//! The pipeline talks to the remote API through [`MetadataTransport`] so that
//! tests (and hosts with their own HTTP stack) can swap the implementation.
//! [`HttpMetadataTransport`] is the bundled reqwest-backed implementation.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::StatsSettings;

/// Failure classes for a single transport call.
///
/// Used for logging only; the fetcher collapses all of them into an absent
/// result before anything crosses a component boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Remote metadata transport.
///
/// `get` serves the REST endpoints; `request` serves structured queries,
/// where `definition` names a host-owned query definition.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait MetadataTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Value, TransportError>;

    async fn request(&self, definition: &str, variables: Value) -> Result<Value, TransportError>;
}

/// Reqwest-backed transport for the remote metadata API.
#[derive(Clone)]
pub struct HttpMetadataTransport {
    client: reqwest::Client,
    graphql_url: String,
}

impl HttpMetadataTransport {
    /// Create a new transport with the configured request timeout.
    pub fn new(settings: &StatsSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            graphql_url: settings.graphql_url.clone(),
        })
    }

    async fn decode(response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MetadataTransport for HttpMetadataTransport {
    async fn get(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Self::decode(response).await
    }

    async fn request(&self, definition: &str, variables: Value) -> Result<Value, TransportError> {
        let body = serde_json::json!({
            "operationName": definition,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Self::decode(response).await
    }
}
