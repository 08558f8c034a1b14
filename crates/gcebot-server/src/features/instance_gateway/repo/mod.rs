use async_trait::async_trait;
use gcebot_providers::{GceComputeClient, ProviderError};

/// Raw instance-control API. Errors are surfaced unchanged; normalisation into
/// user-facing results happens in the gateway service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComputeRepository: Send + Sync {
    /// Current provider status string, e.g. `RUNNING`.
    async fn fetch_status(&self) -> Result<String, ProviderError>;

    /// Submits a start operation and returns its operation id.
    async fn submit_start(&self) -> Result<String, ProviderError>;

    /// Submits a stop operation and returns its operation id.
    async fn submit_stop(&self) -> Result<String, ProviderError>;

    /// Instance name used in logs and messages.
    fn instance_name(&self) -> String;
}

#[async_trait]
impl ComputeRepository for GceComputeClient {
    async fn fetch_status(&self) -> Result<String, ProviderError> {
        self.instance_status().await
    }

    async fn submit_start(&self) -> Result<String, ProviderError> {
        self.start_instance().await
    }

    async fn submit_stop(&self) -> Result<String, ProviderError> {
        self.stop_instance().await
    }

    fn instance_name(&self) -> String {
        self.target().instance_name.clone()
    }
}
