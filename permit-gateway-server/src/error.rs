//! Error types for the HTTP API

use crate::api::Endpoint;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Message returned when the Permit.io credentials are not configured
pub const INCOMPLETE_CONFIGURATION: &str = "Permit.io API configuration is incomplete.";

/// API error type
///
/// Bodies carry a fixed message only. Upstream detail is logged where the
/// error is translated and never reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Required Permit.io configuration is missing (500)
    IncompleteConfiguration,

    /// The upstream call for an endpoint failed (500)
    Upstream(Endpoint),

    /// Service unavailable (503)
    ServiceUnavailable(String),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IncompleteConfiguration | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message placed in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            ApiError::IncompleteConfiguration => INCOMPLETE_CONFIGURATION.to_string(),
            ApiError::Upstream(endpoint) => endpoint.failure_message().to_string(),
            ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::IncompleteConfiguration => f.write_str(INCOMPLETE_CONFIGURATION),
            ApiError::Upstream(endpoint) => write!(f, "Upstream error: {}", endpoint),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            detail: self.detail(),
        });

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::IncompleteConfiguration.to_string(),
            "Permit.io API configuration is incomplete."
        );
        assert_eq!(
            ApiError::Upstream(Endpoint::Resources).to_string(),
            "Upstream error: resources"
        );
        assert_eq!(
            ApiError::ServiceUnavailable("not ready".to_string()).to_string(),
            "Service unavailable: not ready"
        );
    }

    #[tokio::test]
    async fn test_incomplete_configuration_response() {
        let response = ApiError::IncompleteConfiguration.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"detail": "Permit.io API configuration is incomplete."})
        );
    }

    #[tokio::test]
    async fn test_upstream_response_per_endpoint() {
        let response = ApiError::Upstream(Endpoint::Projects).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Internal Server Error while fetching projects.");

        let response = ApiError::Upstream(Endpoint::Environments).into_response();
        let json = body_json(response).await;
        assert_eq!(
            json["detail"],
            "Internal Server Error while fetching environments."
        );
    }

    #[tokio::test]
    async fn test_service_unavailable_response() {
        let response = ApiError::ServiceUnavailable("warming up".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "warming up");
        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    }
}
