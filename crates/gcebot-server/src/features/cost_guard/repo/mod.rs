use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gcebot_providers::{DiscordWebhookClient, ProviderError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outbound notification channel ("send message to channel C").
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, content: &str) -> Result<(), ProviderError>;
}

#[async_trait]
impl Notifier for DiscordWebhookClient {
    async fn notify(&self, content: &str) -> Result<(), ProviderError> {
        self.send(content).await
    }
}

/// Remembers whether the current running period has already been warned about.
#[async_trait]
pub trait NotificationLedger: Send + Sync {
    async fn notified_at(&self) -> Option<DateTime<Utc>>;
    async fn mark_notified(&self, at: DateTime<Utc>);
    async fn reset(&self);
}

#[derive(Clone, Default)]
pub struct InMemoryNotificationLedger {
    notified_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl InMemoryNotificationLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationLedger for InMemoryNotificationLedger {
    async fn notified_at(&self) -> Option<DateTime<Utc>> {
        *self.notified_at.read().await
    }

    async fn mark_notified(&self, at: DateTime<Utc>) {
        *self.notified_at.write().await = Some(at);
    }

    async fn reset(&self) {
        *self.notified_at.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ledger_mark_and_reset() {
        let ledger = InMemoryNotificationLedger::new();
        assert!(ledger.notified_at().await.is_none());

        let now = Utc::now();
        ledger.mark_notified(now).await;
        assert_eq!(ledger.notified_at().await, Some(now));

        ledger.reset().await;
        assert!(ledger.notified_at().await.is_none());
    }

    #[tokio::test]
    async fn test_ledger_clones_share_state() {
        let ledger = InMemoryNotificationLedger::new();
        let other = ledger.clone();
        ledger.mark_notified(Utc::now()).await;
        assert!(other.notified_at().await.is_some());
    }
}
