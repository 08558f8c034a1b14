use crate::features::instance_gateway::repo::ComputeRepository;
use crate::features::observability::controller::global_observability_controller;
use crate::shared::types::{InstanceState, TransitionOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub const START_SENT_MESSAGE: &str =
    "🚀 Start command sent to the server. (It takes 1~2 minutes to finish)";
pub const STOP_SENT_MESSAGE: &str = "🛑 Stop command sent to the server.";

/// Capability interface over the single managed instance.
///
/// Implementations never return errors: a failed state query degrades to
/// [`InstanceState::Unknown`], a failed start/stop to a failed
/// [`TransitionOutcome`] carrying a readable message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstanceGateway: Send + Sync {
    async fn get_state(&self) -> InstanceState;
    async fn start(&self) -> TransitionOutcome;
    async fn stop(&self) -> TransitionOutcome;
}

pub struct ComputeGateway {
    repo: Arc<dyn ComputeRepository>,
}

impl ComputeGateway {
    pub fn new(repo: Arc<dyn ComputeRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl InstanceGateway for ComputeGateway {
    async fn get_state(&self) -> InstanceState {
        match self.repo.fetch_status().await {
            Ok(raw) => InstanceState::from_raw(&raw),
            Err(error) => {
                warn!(
                    instance = %self.repo.instance_name(),
                    error = %error,
                    "Failed to query instance state"
                );
                global_observability_controller().record_gateway_error("get_state");
                InstanceState::Unknown
            }
        }
    }

    async fn start(&self) -> TransitionOutcome {
        match self.repo.submit_start().await {
            Ok(operation) => {
                info!(
                    instance = %self.repo.instance_name(),
                    %operation,
                    "Start operation submitted"
                );
                TransitionOutcome::succeeded(START_SENT_MESSAGE)
            }
            Err(error) => {
                warn!(
                    instance = %self.repo.instance_name(),
                    error = %error,
                    "Start operation failed"
                );
                global_observability_controller().record_gateway_error("start");
                TransitionOutcome::failed(format!("❌ Failed to start the server: {error}"))
            }
        }
    }

    async fn stop(&self) -> TransitionOutcome {
        match self.repo.submit_stop().await {
            Ok(operation) => {
                info!(
                    instance = %self.repo.instance_name(),
                    %operation,
                    "Stop operation submitted"
                );
                TransitionOutcome::succeeded(STOP_SENT_MESSAGE)
            }
            Err(error) => {
                warn!(
                    instance = %self.repo.instance_name(),
                    error = %error,
                    "Stop operation failed"
                );
                global_observability_controller().record_gateway_error("stop");
                TransitionOutcome::failed(format!("❌ Failed to stop the server: {error}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::instance_gateway::repo::MockComputeRepository;
    use gcebot_providers::ProviderError;

    fn gateway_with(mut repo: MockComputeRepository) -> ComputeGateway {
        repo.expect_instance_name()
            .returning(|| "trout-model".to_string());
        ComputeGateway::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_get_state_maps_provider_status() {
        let mut repo = MockComputeRepository::new();
        repo.expect_fetch_status()
            .times(1)
            .returning(|| Ok("STAGING".to_string()));

        let gateway = gateway_with(repo);
        assert_eq!(gateway.get_state().await, InstanceState::Staging);
    }

    #[tokio::test]
    async fn test_get_state_error_degrades_to_unknown() {
        let mut repo = MockComputeRepository::new();
        repo.expect_fetch_status().returning(|| {
            Err(ProviderError::Status {
                status: 404,
                body: "instance not found".to_string(),
            })
        });

        let gateway = gateway_with(repo);
        assert_eq!(gateway.get_state().await, InstanceState::Unknown);
    }

    #[tokio::test]
    async fn test_get_state_timeout_degrades_to_unknown() {
        let mut repo = MockComputeRepository::new();
        repo.expect_fetch_status()
            .returning(|| Err(ProviderError::Timeout("deadline elapsed".to_string())));

        let gateway = gateway_with(repo);
        assert_eq!(gateway.get_state().await, InstanceState::Unknown);
    }

    #[tokio::test]
    async fn test_start_success_message() {
        let mut repo = MockComputeRepository::new();
        repo.expect_submit_start()
            .times(1)
            .returning(|| Ok("operation-1".to_string()));

        let outcome = gateway_with(repo).start().await;
        assert_eq!(outcome, TransitionOutcome::succeeded(START_SENT_MESSAGE));
    }

    #[tokio::test]
    async fn test_start_failure_is_folded_into_message() {
        let mut repo = MockComputeRepository::new();
        repo.expect_submit_start()
            .returning(|| Err(ProviderError::Auth("metadata server unreachable".to_string())));

        let outcome = gateway_with(repo).start().await;
        assert!(outcome.failed);
        assert!(outcome.message.starts_with("❌ Failed to start the server"));
        assert!(outcome.message.contains("metadata server unreachable"));
    }

    #[tokio::test]
    async fn test_stop_success_and_failure() {
        let mut repo = MockComputeRepository::new();
        repo.expect_submit_stop()
            .times(1)
            .returning(|| Ok("operation-2".to_string()));
        let outcome = gateway_with(repo).stop().await;
        assert_eq!(outcome.message, STOP_SENT_MESSAGE);
        assert!(!outcome.failed);

        let mut repo = MockComputeRepository::new();
        repo.expect_submit_stop()
            .returning(|| Err(ProviderError::Http("connection reset".to_string())));
        let outcome = gateway_with(repo).stop().await;
        assert!(outcome.failed);
        assert!(outcome.message.contains("connection reset"));
    }
}
