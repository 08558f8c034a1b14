//! Compute Engine instance-control client.
//!
//! Talks to the `compute/v1` REST API for exactly one instance. Every call is
//! bounded by the client-level timeout; a timeout surfaces as
//! [`ProviderError::Timeout`].

pub mod token;

pub use token::TokenSource;

use crate::{ensure_success, ProviderError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_COMPUTE_ENDPOINT: &str = "https://compute.googleapis.com/compute/v1";

/// Identifies the single instance the bot controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeTarget {
    pub project_id: String,
    pub zone: String,
    pub instance_name: String,
}

impl ComputeTarget {
    pub fn new(
        project_id: impl Into<String>,
        zone: impl Into<String>,
        instance_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            zone: zone.into(),
            instance_name: instance_name.into(),
        }
    }

    pub fn instance_url(&self, endpoint: &str) -> String {
        format!(
            "{}/projects/{}/zones/{}/instances/{}",
            endpoint.trim_end_matches('/'),
            self.project_id,
            self.zone,
            self.instance_name
        )
    }
}

#[derive(Debug, Deserialize)]
struct InstanceResource {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationResource {
    #[serde(default)]
    name: Option<String>,
}

pub struct GceComputeClient {
    client: Client,
    target: ComputeTarget,
    token_source: TokenSource,
    endpoint: String,
}

impl GceComputeClient {
    pub fn new(target: ComputeTarget, token_source: TokenSource, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            target,
            token_source,
            endpoint: DEFAULT_COMPUTE_ENDPOINT.to_string(),
        })
    }

    /// Overrides the API base URL, e.g. for a local emulator.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn target(&self) -> &ComputeTarget {
        &self.target
    }

    /// Returns the raw provider status string (`RUNNING`, `TERMINATED`, ...).
    pub async fn instance_status(&self) -> Result<String> {
        let url = self.target.instance_url(&self.endpoint);
        let token = self.token_source.access_token(&self.client).await?;
        debug!(%url, "Querying instance status");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;
        let body = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(ProviderError::from_reqwest)?;

        parse_instance_status(&body)
    }

    /// Issues `instances.start`. Returns the operation name; completion is not awaited.
    pub async fn start_instance(&self) -> Result<String> {
        self.post_action("start").await
    }

    /// Issues `instances.stop`. Returns the operation name; completion is not awaited.
    pub async fn stop_instance(&self) -> Result<String> {
        self.post_action("stop").await
    }

    async fn post_action(&self, action: &str) -> Result<String> {
        let url = format!("{}/{action}", self.target.instance_url(&self.endpoint));
        let token = self.token_source.access_token(&self.client).await?;
        debug!(%url, "Submitting instance operation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_LENGTH, "0")
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;
        let body = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(ProviderError::from_reqwest)?;

        parse_operation_name(&body)
    }
}

pub(crate) fn parse_instance_status(body: &str) -> Result<String> {
    let instance: InstanceResource =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    instance
        .status
        .ok_or_else(|| ProviderError::Decode("instance resource has no status".to_string()))
}

pub(crate) fn parse_operation_name(body: &str) -> Result<String> {
    let operation: OperationResource =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    Ok(operation.name.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_url() {
        let target = ComputeTarget::new("my-project", "us-west1-b", "gpu-box");
        assert_eq!(
            target.instance_url(DEFAULT_COMPUTE_ENDPOINT),
            "https://compute.googleapis.com/compute/v1/projects/my-project/zones/us-west1-b/instances/gpu-box"
        );
        assert_eq!(
            target.instance_url("http://localhost:9000/"),
            "http://localhost:9000/projects/my-project/zones/us-west1-b/instances/gpu-box"
        );
    }

    #[test]
    fn test_parse_instance_status() {
        let body = r#"{"kind":"compute#instance","name":"gpu-box","status":"RUNNING"}"#;
        assert_eq!(parse_instance_status(body).unwrap(), "RUNNING");
    }

    #[test]
    fn test_parse_instance_status_missing_field() {
        let err = parse_instance_status(r#"{"name":"gpu-box"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn test_parse_operation_name() {
        let body = r#"{"kind":"compute#operation","name":"operation-123","status":"PENDING"}"#;
        assert_eq!(parse_operation_name(body).unwrap(), "operation-123");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_reported_as_error() {
        let client = GceComputeClient::new(
            ComputeTarget::new("p", "z", "i"),
            TokenSource::Static("token".to_string()),
            Duration::from_millis(500),
        )
        .unwrap()
        .with_endpoint("http://127.0.0.1:9");

        let result = client.instance_status().await;
        assert!(matches!(
            result,
            Err(ProviderError::Http(_)) | Err(ProviderError::Timeout(_))
        ));
    }
}
