//! API response types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title reported by the service info endpoint
pub const SERVICE_TITLE: &str = "Permit.io API Integration";

/// Description reported by the service info endpoint
pub const SERVICE_DESCRIPTION: &str =
    "An axum-based gateway using the Permit.io API for role and resource management.";

/// Relayed endpoints, used for error messages, logs and metric labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /projects`
    Projects,
    /// `GET /environments`
    Environments,
    /// `GET /resources`
    Resources,
    /// `GET /resource_relationships`
    ResourceRelationships,
}

impl Endpoint {
    /// Label used in metrics and spans
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Projects => "projects",
            Endpoint::Environments => "environments",
            Endpoint::Resources => "resources",
            Endpoint::ResourceRelationships => "resource_relationships",
        }
    }

    /// Fixed message returned to callers when the upstream call fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::Projects => "Internal Server Error while fetching projects.",
            Endpoint::Environments => "Internal Server Error while fetching environments.",
            Endpoint::Resources => "Internal Server Error while fetching resources.",
            // Shares the resources wording, as the service always has
            Endpoint::ResourceRelationships => "Internal Server Error while fetching resources.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::ResourceRelationships => f.write_str("resource relationships"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Whether all Permit.io credentials are configured
    pub configured: bool,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
}

/// Service metadata served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service title
    pub title: String,
    /// Short description
    pub description: String,
    /// Service version
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            title: SERVICE_TITLE.to_string(),
            description: SERVICE_DESCRIPTION.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
