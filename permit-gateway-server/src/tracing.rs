//! Logging and OpenTelemetry tracing setup for the gateway

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{self, RandomIdGenerator, Sampler},
    Resource,
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, FmtSubscriber, Registry,
};

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,permit_gateway=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize OpenTelemetry with OTLP exporter
pub fn init_telemetry(service_name: &str) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(3));

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            trace::config()
                .with_sampler(get_sampler())
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

/// Get sampler configuration from environment
fn get_sampler() -> Sampler {
    sampler_from(std::env::var("OTEL_TRACES_SAMPLER_ARG").ok().as_deref())
}

fn sampler_from(arg: Option<&str>) -> Sampler {
    let sample_rate = arg.and_then(|s| s.parse::<f64>().ok()).unwrap_or(1.0);

    if sample_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sample_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sample_rate)
    }
}

/// Initialize the complete tracing stack (console + OpenTelemetry)
pub fn init_tracing_stack(service_name: &str) -> anyhow::Result<()> {
    let tracer = init_telemetry(service_name)?;
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// Initialize console-only logging
pub fn init_console_logging() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter())
        .finish();
    ::tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Shutdown OpenTelemetry provider
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Create the span wrapping one upstream Permit.io call
pub fn create_upstream_span(endpoint: &str) -> ::tracing::Span {
    ::tracing::info_span!(
        "upstream_call",
        endpoint = %endpoint,
        otel.kind = "client",
        outcome = ::tracing::field::Empty,
        otel.status_code = ::tracing::field::Empty,
    )
}

/// Record the outcome of an upstream call on its span
pub fn record_outcome(span: &::tracing::Span, outcome: &str) {
    span.record("outcome", outcome);
    span.record(
        "otel.status_code",
        if outcome == "success" { "OK" } else { "ERROR" },
    );
}
