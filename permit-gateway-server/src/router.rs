//! Route table and middleware stack

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Build the gateway application
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Relayed Permit.io endpoints
        .route("/projects", get(handlers::list_projects))
        .route("/environments", get(handlers::list_environments))
        .route("/resources", get(handlers::list_resources))
        .route(
            "/resource_relationships",
            get(handlers::list_resource_relationships),
        )
        // Service info and health checks
        .route("/", get(handlers::service_info))
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(CompressionLayer::new())
        // Any origin, with credentials. Development only.
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}
