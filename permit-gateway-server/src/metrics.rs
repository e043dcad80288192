//! Prometheus metrics collection for the gateway

use crate::api::Endpoint;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!(
        "permit_gateway_requests_total",
        "Total number of relayed requests by endpoint and outcome"
    );
    describe_counter!(
        "permit_gateway_config_rejections_total",
        "Requests rejected because Permit.io configuration is incomplete"
    );
    describe_counter!("permit_gateway_errors_total", "Total number of upstream errors");

    // Histograms
    describe_histogram!(
        "permit_gateway_upstream_latency_seconds",
        "Latency of upstream Permit.io calls in seconds"
    );
}

/// Record a relayed request
pub fn record_request(endpoint: Endpoint, outcome: &'static str) {
    counter!(
        "permit_gateway_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a request rejected by the configuration guard
pub fn record_config_rejection() {
    counter!("permit_gateway_config_rejections_total").increment(1);
}

/// Record an error
pub fn record_error(error_type: &str) {
    counter!("permit_gateway_errors_total", "type" => error_type.to_string()).increment(1);
}

/// Timer for measuring upstream call latency
pub struct LatencyTimer {
    start: Instant,
    endpoint: Endpoint,
}

impl LatencyTimer {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Record the elapsed time and return it in seconds
    pub fn record(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        histogram!(
            "permit_gateway_upstream_latency_seconds",
            "endpoint" => self.endpoint.as_str()
        )
        .record(elapsed);
        elapsed
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Initialize Prometheus exporter and store its handle
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Get Prometheus metrics string
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
