//! Per-request configuration guard

use crate::error::ApiError;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use permit_gateway_core::PermitApi;
use std::sync::Arc;
use tracing::error;

/// Extractor handing out the Permit.io client once the config is complete
///
/// Rejects with [`ApiError::IncompleteConfiguration`] before the handler
/// body runs, so no upstream call is attempted with missing credentials.
pub struct PermitClientGuard {
    /// Shared upstream client
    pub client: Arc<dyn PermitApi>,

    /// Configured project id
    pub project_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for PermitClientGuard {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.config.require() {
            Ok(config) => Ok(Self {
                client: state.client.clone(),
                project_id: config.project_id.to_string(),
            }),
            Err(e) => {
                error!(
                    missing = ?state.config.missing_keys(),
                    "Permit.io API configuration is missing in environment variables: {}",
                    e
                );
                crate::metrics::record_config_rejection();
                Err(ApiError::IncompleteConfiguration)
            }
        }
    }
}
