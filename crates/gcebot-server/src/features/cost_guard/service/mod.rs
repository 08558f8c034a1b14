use crate::features::cost_guard::repo::{NotificationLedger, Notifier};
use crate::features::instance_gateway::service::InstanceGateway;
use crate::features::observability::controller::global_observability_controller;
use crate::shared::error::BotError;
use crate::shared::types::{InstanceState, NotifyPolicy};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostGuardStatus {
    NoActionNeeded,
    Notified,
    AlreadyNotified,
    NotConfigured,
    DeliveryFailed,
}

impl CostGuardStatus {
    pub fn http_status(&self) -> u16 {
        match self {
            CostGuardStatus::NoActionNeeded
            | CostGuardStatus::Notified
            | CostGuardStatus::AlreadyNotified => 200,
            CostGuardStatus::NotConfigured | CostGuardStatus::DeliveryFailed => 500,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.http_status() >= 500
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CostGuardStatus::NoActionNeeded => "no_action_needed",
            CostGuardStatus::Notified => "notified",
            CostGuardStatus::AlreadyNotified => "already_notified",
            CostGuardStatus::NotConfigured => "not_configured",
            CostGuardStatus::DeliveryFailed => "delivery_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGuardReport {
    pub message: String,
    pub status: CostGuardStatus,
}

impl CostGuardReport {
    fn new(status: CostGuardStatus, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.status.http_status()
    }
}

pub fn cost_warning_message(instance_name: &str) -> String {
    format!(
        "⚠️ Cost warning: instance `{instance_name}` is still RUNNING. Use /stop if it is not in use."
    )
}

pub struct CostGuardService {
    gateway: Arc<dyn InstanceGateway>,
    notifier: Option<Arc<dyn Notifier>>,
    ledger: Arc<dyn NotificationLedger>,
    policy: NotifyPolicy,
    instance_name: String,
}

impl CostGuardService {
    pub fn new(
        gateway: Arc<dyn InstanceGateway>,
        notifier: Option<Arc<dyn Notifier>>,
        ledger: Arc<dyn NotificationLedger>,
        policy: NotifyPolicy,
        instance_name: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            ledger,
            policy,
            instance_name: instance_name.into(),
        }
    }

    /// Queries the state once and warns if the instance is running.
    pub async fn check_and_notify(&self) -> CostGuardReport {
        let state = self.gateway.get_state().await;
        let report = self.evaluate(state).await;
        global_observability_controller().record_cost_check(report.status.as_str());
        report
    }

    async fn evaluate(&self, state: InstanceState) -> CostGuardReport {
        if !state.is_running() {
            // Unknown means the query failed, not that the running period ended.
            if state != InstanceState::Unknown {
                self.ledger.reset().await;
            }
            return CostGuardReport::new(
                CostGuardStatus::NoActionNeeded,
                format!("Instance is {state}; no action needed"),
            );
        }

        let Some(notifier) = &self.notifier else {
            warn!(instance = %self.instance_name, "Instance is running but no notification channel is configured");
            return CostGuardReport::new(
                CostGuardStatus::NotConfigured,
                "Notification channel not configured",
            );
        };

        if self.policy == NotifyPolicy::OncePerRunningPeriod {
            if let Some(at) = self.ledger.notified_at().await {
                return CostGuardReport::new(
                    CostGuardStatus::AlreadyNotified,
                    format!("Cost warning already sent at {}", at.to_rfc3339()),
                );
            }
        }

        match notifier.notify(&cost_warning_message(&self.instance_name)).await {
            Ok(()) => {
                self.ledger.mark_notified(Utc::now()).await;
                info!(instance = %self.instance_name, "Cost warning sent");
                CostGuardReport::new(CostGuardStatus::Notified, "Cost warning sent")
            }
            Err(error) => {
                let error = BotError::Notification(error.to_string());
                warn!(
                    instance = %self.instance_name,
                    error = %error,
                    code = error.error_code(),
                    "Cost warning delivery failed"
                );
                CostGuardReport::new(
                    CostGuardStatus::DeliveryFailed,
                    format!("Failed to send cost warning: {error}"),
                )
            }
        }
    }
}
