use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub status_updates_total: IntCounterVec,
    pub escalations_total: IntCounterVec,
    pub deliveries_tracked: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let status_updates_total = IntCounterVec::new(
            Opts::new("status_updates_total", "Committed status updates by status"),
            &["status"],
        )
        .expect("valid status_updates_total metric");

        let escalations_total = IntCounterVec::new(
            Opts::new("escalations_total", "Escalation chain runs by error kind"),
            &["kind"],
        )
        .expect("valid escalations_total metric");

        let deliveries_tracked =
            IntGauge::new("deliveries_tracked", "Number of delivery records held")
                .expect("valid deliveries_tracked metric");

        registry
            .register(Box::new(status_updates_total.clone()))
            .expect("register status_updates_total");
        registry
            .register(Box::new(escalations_total.clone()))
            .expect("register escalations_total");
        registry
            .register(Box::new(deliveries_tracked.clone()))
            .expect("register deliveries_tracked");

        Self {
            registry,
            status_updates_total,
            escalations_total,
            deliveries_tracked,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
