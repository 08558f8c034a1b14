pub mod features;

pub use features::command_registry::{
    load_command_definitions, CommandDefinition, DiscordCommandRegistrar,
};
pub use features::compute_provider::{ComputeTarget, GceComputeClient, TokenSource};
pub use features::messaging_provider::DiscordWebhookClient;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl ProviderError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Fails with `ProviderError::Status` unless the response is 2xx.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}
