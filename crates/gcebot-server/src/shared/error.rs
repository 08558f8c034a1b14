use gcebot_core::CoreError;
use gcebot_providers::ProviderError;
use thiserror::Error;

/// Bot-level errors
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Notification error: {0}")]
    Notification(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl BotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable identifier used as a log field and metrics label.
    pub fn error_code(&self) -> &'static str {
        match self {
            BotError::Config(_) => "CONFIG",
            BotError::Provider(ProviderError::Timeout(_)) => "PROVIDER_TIMEOUT",
            BotError::Provider(_) => "PROVIDER",
            BotError::Notification(_) => "NOTIFICATION",
            BotError::InvalidPayload(_) => "INVALID_PAYLOAD",
        }
    }
}

impl From<CoreError> for BotError {
    fn from(err: CoreError) -> Self {
        BotError::InvalidPayload(err.to_string())
    }
}

pub type BotResult<T> = std::result::Result<T, BotError>;
