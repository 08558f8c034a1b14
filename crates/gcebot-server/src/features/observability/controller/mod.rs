use crate::features::observability::repo::ObservabilityRepository;
use crate::features::observability::service::ObservabilityService;
use std::sync::{Arc, OnceLock};

pub struct ObservabilityController {
    service: ObservabilityService,
}

impl ObservabilityController {
    pub fn new(service: ObservabilityService) -> Self {
        Self { service }
    }

    pub fn record_interaction(&self, kind: &str, status: u16, seconds: f64) {
        self.service.record_interaction(kind, status, seconds);
    }

    pub fn record_command(&self, command: &str) {
        self.service.record_command(command);
    }

    #[cfg(test)]
    pub(crate) fn command_count(&self, command: &str) -> f64 {
        self.service.command_count(command)
    }

    pub fn record_gateway_error(&self, operation: &str) {
        self.service.record_gateway_error(operation);
    }

    pub fn record_cost_check(&self, outcome: &str) {
        self.service.record_cost_check(outcome);
    }

    pub fn render_metrics(&self) -> Result<String, String> {
        self.service.render_metrics()
    }
}

static GLOBAL_OBSERVABILITY: OnceLock<Arc<ObservabilityController>> = OnceLock::new();

pub fn global_observability_controller() -> Arc<ObservabilityController> {
    GLOBAL_OBSERVABILITY
        .get_or_init(|| {
            let repo = Arc::new(ObservabilityRepository::new().expect("metrics init"));
            Arc::new(ObservabilityController::new(ObservabilityService::new(
                repo,
            )))
        })
        .clone()
}
