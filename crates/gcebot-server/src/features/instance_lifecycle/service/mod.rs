//! Start / stop / status decisions.
//!
//! Each handler reads the instance state fresh from the gateway and only
//! issues a mutating call when the instance is not already in (or moving
//! towards) the requested state.

use crate::features::instance_gateway::service::InstanceGateway;
use crate::shared::types::InstanceState;
use std::sync::Arc;
use tracing::info;

pub const ALREADY_RUNNING_MESSAGE: &str = "✅ The server is already running.";
pub const ALREADY_STARTING_MESSAGE: &str = "⏳ The server is already starting.";
pub const ALREADY_STOPPED_MESSAGE: &str = "⛔ The server is already stopped.";
pub const ALREADY_STOPPING_MESSAGE: &str = "⏳ The server is already stopping.";

pub struct LifecycleService {
    gateway: Arc<dyn InstanceGateway>,
}

impl LifecycleService {
    pub fn new(gateway: Arc<dyn InstanceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle_start(&self) -> String {
        let state = self.gateway.get_state().await;

        match state {
            InstanceState::Running => ALREADY_RUNNING_MESSAGE.to_string(),
            InstanceState::Provisioning | InstanceState::Staging => {
                ALREADY_STARTING_MESSAGE.to_string()
            }
            InstanceState::Terminated
            | InstanceState::Stopping
            | InstanceState::Suspended
            | InstanceState::Unknown
            | InstanceState::Other(_) => {
                info!(%state, "Starting instance");
                self.gateway.start().await.message
            }
        }
    }

    pub async fn handle_stop(&self) -> String {
        let state = self.gateway.get_state().await;

        match state {
            InstanceState::Terminated => ALREADY_STOPPED_MESSAGE.to_string(),
            InstanceState::Stopping => ALREADY_STOPPING_MESSAGE.to_string(),
            InstanceState::Running
            | InstanceState::Provisioning
            | InstanceState::Staging
            | InstanceState::Suspended
            | InstanceState::Unknown
            | InstanceState::Other(_) => {
                info!(%state, "Stopping instance");
                self.gateway.stop().await.message
            }
        }
    }

    pub async fn handle_status(&self) -> String {
        let state = self.gateway.get_state().await;
        format!("Current GPU server state:\n> {}", status_label(&state))
    }
}

/// Human-readable label for a state. Unnamed states fall back to the raw value.
pub fn status_label(state: &InstanceState) -> String {
    match state {
        InstanceState::Running => "✅ Running (RUNNING)".to_string(),
        InstanceState::Terminated => "⛔ Stopped (TERMINATED)".to_string(),
        InstanceState::Stopping => "⏳ Stopping (STOPPING)".to_string(),
        InstanceState::Provisioning => "⏳ Provisioning (PROVISIONING)".to_string(),
        InstanceState::Staging => "⏳ Staging (STAGING)".to_string(),
        InstanceState::Suspended => "💤 Suspended (SUSPENDED)".to_string(),
        InstanceState::Unknown | InstanceState::Other(_) => format!("⚠️ State: {state}"),
    }
}
