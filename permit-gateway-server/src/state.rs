//! Application state

use permit_gateway_core::{PermitApi, PermitClient, PermitConfig};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// Built once before the server starts and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Permit.io configuration read at startup
    pub config: Arc<PermitConfig>,

    /// Upstream Permit.io client
    pub client: Arc<dyn PermitApi>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create application state around an existing client
    pub fn new(config: PermitConfig, client: Arc<dyn PermitApi>) -> Self {
        Self {
            config: Arc::new(config),
            client,
            start_time: Instant::now(),
        }
    }

    /// Create application state with an HTTP client built from `config`
    pub fn from_config(config: PermitConfig) -> permit_gateway_core::Result<Self> {
        let client = PermitClient::new(config.clone())?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
