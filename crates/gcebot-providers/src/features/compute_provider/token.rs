use crate::{ensure_success, ProviderError, Result};
use reqwest::Client;
use serde::Deserialize;

pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Where OAuth access tokens for the Compute API come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Fixed bearer token, e.g. from `gcloud auth print-access-token`.
    Static(String),
    /// Service-account token served by the GCE / Cloud Run metadata server.
    MetadataServer { url: String },
}

impl TokenSource {
    pub fn metadata_server() -> Self {
        Self::MetadataServer {
            url: METADATA_TOKEN_URL.to_string(),
        }
    }

    pub async fn access_token(&self, client: &Client) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::MetadataServer { url } => {
                let response = client
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| ProviderError::Auth(format!("metadata server unreachable: {e}")))?;
                let body = ensure_success(response)
                    .await
                    .map_err(|e| ProviderError::Auth(e.to_string()))?
                    .text()
                    .await
                    .map_err(ProviderError::from_reqwest)?;
                parse_token_response(&body)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

pub(crate) fn parse_token_response(body: &str) -> Result<String> {
    let token: MetadataToken = serde_json::from_str(body)
        .map_err(|e| ProviderError::Auth(format!("invalid token response: {e}")))?;
    if token.access_token.is_empty() {
        return Err(ProviderError::Auth("empty access token".to_string()));
    }
    Ok(token.access_token)
}
