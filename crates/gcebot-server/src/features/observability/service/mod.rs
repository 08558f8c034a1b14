use crate::features::observability::repo::ObservabilityRepository;
use std::sync::Arc;

pub struct ObservabilityService {
    repo: Arc<ObservabilityRepository>,
}

impl ObservabilityService {
    pub fn new(repo: Arc<ObservabilityRepository>) -> Self {
        Self { repo }
    }

    pub fn record_interaction(&self, kind: &str, status: u16, seconds: f64) {
        self.repo
            .observe_interaction(kind, &status.to_string(), seconds);
    }

    pub fn record_command(&self, command: &str) {
        self.repo.inc_command_total(command);
    }

    #[cfg(test)]
    pub(crate) fn command_count(&self, command: &str) -> f64 {
        self.repo.command_count(command)
    }

    pub fn record_gateway_error(&self, operation: &str) {
        self.repo.inc_gateway_error_total(operation);
    }

    pub fn record_cost_check(&self, outcome: &str) {
        self.repo.inc_cost_warning_total(outcome);
    }

    pub fn render_metrics(&self) -> Result<String, String> {
        self.repo.render_metrics()
    }
}
