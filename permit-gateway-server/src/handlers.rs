//! HTTP request handlers

use crate::api::{Endpoint, HealthResponse, HealthStatus, ServiceInfo};
use crate::error::{ApiError, ApiResult, INCOMPLETE_CONFIGURATION};
use crate::guard::PermitClientGuard;
use crate::metrics::LatencyTimer;
use crate::state::AppState;
use axum::{extract::State, Json};
use permit_gateway_core::RelationshipPage;
use serde_json::Value;
use std::future::Future;
use tracing::{error, trace, warn, Instrument};

/// Await one upstream call and translate its result for the HTTP layer
async fn relay<T, F>(endpoint: Endpoint, call: F) -> ApiResult<Json<T>>
where
    F: Future<Output = permit_gateway_core::Result<T>>,
{
    let span = crate::tracing::create_upstream_span(endpoint.as_str());
    let timer = LatencyTimer::new(endpoint);

    let result = call.instrument(span.clone()).await;
    let elapsed = timer.record();

    crate::tracing::record_outcome(&span, if result.is_ok() { "success" } else { "error" });
    trace!(
        endpoint = endpoint.as_str(),
        "Permit.io call finished in {:.2}ms",
        elapsed * 1000.0
    );

    translate(endpoint, result)
}

/// Map a core result onto the HTTP layer
///
/// This is the only place failures are logged.
fn translate<T>(endpoint: Endpoint, result: permit_gateway_core::Result<T>) -> ApiResult<Json<T>> {
    match result {
        Ok(payload) => {
            crate::metrics::record_request(endpoint, "success");
            Ok(Json(payload))
        }
        Err(e) => {
            crate::metrics::record_request(endpoint, "error");
            crate::metrics::record_error(endpoint.as_str());
            error!(endpoint = endpoint.as_str(), "Error fetching {}: {}", endpoint, e);
            Err(ApiError::Upstream(endpoint))
        }
    }
}

/// List all projects
pub async fn list_projects(guard: PermitClientGuard) -> ApiResult<Json<Value>> {
    relay(Endpoint::Projects, guard.client.list_projects()).await
}

/// List environments of the configured project
pub async fn list_environments(guard: PermitClientGuard) -> ApiResult<Json<Value>> {
    relay(
        Endpoint::Environments,
        guard.client.list_environments(&guard.project_id),
    )
    .await
}

/// List resources of the configured environment
pub async fn list_resources(guard: PermitClientGuard) -> ApiResult<Json<Value>> {
    relay(Endpoint::Resources, guard.client.list_resources()).await
}

/// List resource relationships
///
/// Serves the embedded sample page; Permit.io is not queried.
pub async fn list_resource_relationships(
    _guard: PermitClientGuard,
) -> ApiResult<Json<RelationshipPage>> {
    translate(Endpoint::ResourceRelationships, RelationshipPage::fixture())
}

/// Service metadata
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Health check - liveness probe
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        configured: state.config.is_complete(),
    })
}

/// Health check - readiness probe
///
/// Ready once all Permit.io credentials are configured. Permit.io itself is
/// not contacted.
pub async fn health_ready(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if !state.config.is_complete() {
        warn!(
            missing = ?state.config.missing_keys(),
            "Readiness check failed"
        );
        return Err(ApiError::ServiceUnavailable(
            INCOMPLETE_CONFIGURATION.to_string(),
        ));
    }

    Ok(Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        configured: true,
    }))
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    crate::metrics::get_prometheus_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_gateway_core::GatewayError;

    #[test]
    fn test_translate_success_wraps_payload() {
        let Json(value) = translate(Endpoint::Projects, Ok(serde_json::json!([1, 2]))).unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn test_translate_failure_hides_detail() {
        let result: permit_gateway_core::Result<Value> = Err(GatewayError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        });

        let err = translate(Endpoint::ResourceRelationships, result).unwrap_err();
        assert_eq!(err, ApiError::Upstream(Endpoint::ResourceRelationships));
        assert_eq!(err.detail(), "Internal Server Error while fetching resources.");
    }
}
