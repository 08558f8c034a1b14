use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use crate::features::cost_guard::service::{CostGuardReport, CostGuardService};

#[derive(Clone)]
pub struct CostGuardController {
    service: Arc<CostGuardService>,
}

impl CostGuardController {
    pub fn new(service: Arc<CostGuardService>) -> Self {
        Self { service }
    }

    pub async fn check(&self) -> CostGuardReport {
        self.service.check_and_notify().await
    }

    /// Runs a check on every tick. The first tick fires immediately.
    pub fn spawn_periodic_checks(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;

                let report = self.check().await;
                if report.status.is_failure() {
                    warn!(
                        status = report.status.as_str(),
                        message = %report.message,
                        "Scheduled cost check failed"
                    );
                } else {
                    debug!(status = report.status.as_str(), "Scheduled cost check done");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cost_guard::repo::{InMemoryNotificationLedger, MockNotifier, Notifier};
    use crate::features::cost_guard::service::CostGuardStatus;
    use crate::features::instance_gateway::service::MockInstanceGateway;
    use crate::shared::types::{InstanceState, NotifyPolicy};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller(state: InstanceState, notifier: MockNotifier) -> Arc<CostGuardController> {
        let mut gateway = MockInstanceGateway::new();
        gateway
            .expect_get_state()
            .returning(move || state.clone());

        let service = CostGuardService::new(
            Arc::new(gateway),
            Some(Arc::new(notifier) as Arc<dyn Notifier>),
            Arc::new(InMemoryNotificationLedger::new()),
            NotifyPolicy::OncePerRunningPeriod,
            "gpu-box",
        );
        Arc::new(CostGuardController::new(Arc::new(service)))
    }

    #[tokio::test]
    async fn test_check_delegates_to_service() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let report = controller(InstanceState::Staging, notifier).check().await;
        assert_eq!(report.status, CostGuardStatus::NoActionNeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_checks_run_on_each_tick() {
        let checks = Arc::new(AtomicUsize::new(0));
        let counter = checks.clone();
        let mut gateway = MockInstanceGateway::new();
        gateway.expect_get_state().returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            InstanceState::Running
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().returning(|_| Ok(()));

        let service = CostGuardService::new(
            Arc::new(gateway),
            Some(Arc::new(notifier) as Arc<dyn Notifier>),
            Arc::new(InMemoryNotificationLedger::new()),
            NotifyPolicy::EveryCheck,
            "gpu-box",
        );
        let handle = Arc::new(CostGuardController::new(Arc::new(service)))
            .spawn_periodic_checks(Duration::from_secs(60));

        time::sleep(Duration::from_secs(150)).await;
        handle.abort();
        let _ = handle.await;

        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }
}
