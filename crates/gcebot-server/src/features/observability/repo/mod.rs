use prometheus::{opts, CounterVec, Encoder, Histogram, HistogramOpts, Registry, TextEncoder};

pub struct ObservabilityRepository {
    registry: Registry,
    interaction_total: CounterVec,
    interaction_latency_seconds: Histogram,
    command_total: CounterVec,
    gateway_error_total: CounterVec,
    cost_warning_total: CounterVec,
}

impl ObservabilityRepository {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();

        let interaction_total = CounterVec::new(
            opts!(
                "gcebot_interaction_total",
                "Inbound interaction requests by kind and HTTP status"
            ),
            &["kind", "status"],
        )
        .map_err(|e| e.to_string())?;
        let interaction_latency_seconds = Histogram::with_opts(HistogramOpts::new(
            "gcebot_interaction_latency_seconds",
            "Interaction handling latency (seconds)",
        ))
        .map_err(|e| e.to_string())?;
        let command_total = CounterVec::new(
            opts!("gcebot_command_total", "Dispatched slash commands"),
            &["command"],
        )
        .map_err(|e| e.to_string())?;
        let gateway_error_total = CounterVec::new(
            opts!(
                "gcebot_gateway_error_total",
                "Compute provider calls that failed"
            ),
            &["operation"],
        )
        .map_err(|e| e.to_string())?;
        let cost_warning_total = CounterVec::new(
            opts!(
                "gcebot_cost_warning_total",
                "Cost-guard checks by outcome"
            ),
            &["outcome"],
        )
        .map_err(|e| e.to_string())?;

        registry
            .register(Box::new(interaction_total.clone()))
            .map_err(|e| e.to_string())?;
        registry
            .register(Box::new(interaction_latency_seconds.clone()))
            .map_err(|e| e.to_string())?;
        registry
            .register(Box::new(command_total.clone()))
            .map_err(|e| e.to_string())?;
        registry
            .register(Box::new(gateway_error_total.clone()))
            .map_err(|e| e.to_string())?;
        registry
            .register(Box::new(cost_warning_total.clone()))
            .map_err(|e| e.to_string())?;

        Ok(Self {
            registry,
            interaction_total,
            interaction_latency_seconds,
            command_total,
            gateway_error_total,
            cost_warning_total,
        })
    }

    pub fn observe_interaction(&self, kind: &str, status: &str, seconds: f64) {
        self.interaction_total
            .with_label_values(&[kind, status])
            .inc();
        self.interaction_latency_seconds.observe(seconds);
    }

    pub fn inc_command_total(&self, command: &str) {
        self.command_total.with_label_values(&[command]).inc();
    }

    #[cfg(test)]
    pub(crate) fn command_count(&self, command: &str) -> f64 {
        self.command_total.with_label_values(&[command]).get()
    }

    pub fn inc_gateway_error_total(&self, operation: &str) {
        self.gateway_error_total
            .with_label_values(&[operation])
            .inc();
    }

    pub fn inc_cost_warning_total(&self, outcome: &str) {
        self.cost_warning_total.with_label_values(&[outcome]).inc();
    }

    pub fn render_metrics(&self) -> Result<String, String> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| e.to_string())?;
        String::from_utf8(buffer).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_series() {
        let repo = ObservabilityRepository::new().unwrap();
        repo.inc_command_total("status");
        repo.inc_gateway_error_total("start");

        let rendered = repo.render_metrics().unwrap();
        assert!(rendered.contains("gcebot_command_total{command=\"status\"} 1"));
        assert!(rendered.contains("gcebot_gateway_error_total{operation=\"start\"} 1"));
    }
}
