//! Permit Gateway HTTP Server
//!
//! A thin axum facade over the Permit.io API. Every relayed endpoint makes
//! at most one upstream call and answers with its JSON payload or a fixed
//! `{"detail": ...}` error.

pub mod api;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod state;
pub mod tracing;

pub use api::{Endpoint, HealthResponse, HealthStatus, ServiceInfo};
pub use error::{ApiError, ApiResult};
pub use guard::PermitClientGuard;
pub use router::build_router;
pub use state::AppState;
