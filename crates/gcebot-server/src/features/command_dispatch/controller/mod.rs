use crate::features::command_dispatch::service::CommandDispatcher;
use crate::features::signature_verification::{verify_request, PublicKey};
use crate::shared::error::BotError;
use crate::shared::types::{InteractionRequest, InteractionResponse};
use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the HTTP layer should answer for one interaction delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Signature missing or invalid.
    Unauthorized,
    /// Signed, but not a parseable interaction.
    BadRequest(String),
    Reply(InteractionResponse),
}

/// Verifies, parses and dispatches one interaction delivery.
pub struct InteractionController {
    dispatcher: Arc<CommandDispatcher>,
    public_key: PublicKey,
}

impl InteractionController {
    pub fn new(dispatcher: Arc<CommandDispatcher>, public_key: PublicKey) -> Self {
        Self {
            dispatcher,
            public_key,
        }
    }

    pub async fn handle(&self, headers: &HeaderMap, raw_body: &[u8]) -> InteractionOutcome {
        if !verify_request(headers, raw_body, &self.public_key) {
            debug!("Rejected interaction with bad signature");
            return InteractionOutcome::Unauthorized;
        }

        let request = match InteractionRequest::from_slice(raw_body) {
            Ok(request) => request,
            Err(error) => {
                let error = BotError::from(error);
                warn!(
                    error = %error,
                    code = error.error_code(),
                    "Signed interaction could not be parsed"
                );
                return InteractionOutcome::BadRequest(error.to_string());
            }
        };

        InteractionOutcome::Reply(self.dispatcher.dispatch(&request).await)
    }
}
