use crate::{ensure_success, ProviderError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Posts plain-text messages to a Discord channel webhook.
pub struct DiscordWebhookClient {
    client: Client,
    url: String,
}

impl DiscordWebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Delivers `content`. Any non-2xx answer is a delivery failure.
    pub async fn send(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { content })
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;
        ensure_success(response).await?;
        Ok(())
    }
}
