//! Process configuration for the Permit.io connection
//!
//! Values are read once at startup. Missing credentials do not fail
//! construction; they are reported later through [`PermitConfig::require`]
//! so every request can be rejected consistently.

use crate::error::{GatewayError, Result};
use std::fmt;

/// Default Permit.io API base URL
pub const DEFAULT_API_URL: &str = "https://api.permit.io";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "PERMIT_API_KEY";
/// Environment variable holding the environment id
pub const ENV_ID_VAR: &str = "ENV_ID";
/// Environment variable holding the project id
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
/// Environment variable overriding the API base URL
pub const API_URL_VAR: &str = "PERMIT_API_URL";

/// Permit.io connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct PermitConfig {
    /// API key used as bearer token
    pub api_key: Option<String>,

    /// Environment id or key
    pub environment_id: Option<String>,

    /// Project id or key
    pub project_id: Option<String>,

    /// Base URL of the Permit.io REST API
    pub api_url: String,
}

/// Borrowed view of a config whose credentials are all present
#[derive(Debug, Clone, Copy)]
pub struct CompleteConfig<'a> {
    /// API key
    pub api_key: &'a str,
    /// Environment id
    pub environment_id: &'a str,
    /// Project id
    pub project_id: &'a str,
}

impl PermitConfig {
    /// Create a config from explicit values
    pub fn new(
        api_key: impl Into<String>,
        environment_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: non_empty(Some(api_key.into())),
            environment_id: non_empty(Some(environment_id.into())),
            project_id: non_empty(Some(project_id.into())),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Read the config from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = non_empty(lookup(API_URL_VAR))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_key: non_empty(lookup(API_KEY_VAR)),
            environment_id: non_empty(lookup(ENV_ID_VAR)),
            project_id: non_empty(lookup(PROJECT_ID_VAR)),
            api_url,
        }
    }

    /// Override the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Names of required variables that are missing
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(API_KEY_VAR);
        }
        if self.environment_id.is_none() {
            missing.push(ENV_ID_VAR);
        }
        if self.project_id.is_none() {
            missing.push(PROJECT_ID_VAR);
        }
        missing
    }

    /// True when all three credentials are present
    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    /// Borrow the credentials, or fail with [`GatewayError::IncompleteConfig`]
    pub fn require(&self) -> Result<CompleteConfig<'_>> {
        match (&self.api_key, &self.environment_id, &self.project_id) {
            (Some(api_key), Some(environment_id), Some(project_id)) => Ok(CompleteConfig {
                api_key,
                environment_id,
                project_id,
            }),
            _ => Err(GatewayError::IncompleteConfig {
                missing: self.missing_keys(),
            }),
        }
    }
}

impl fmt::Debug for PermitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermitConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("environment_id", &self.environment_id)
            .field("project_id", &self.project_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Unset and empty values are missing; anything else, whitespace included,
/// is passed through for Permit.io to judge.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
