//! Permit Gateway Core - configuration and upstream client for the Permit.io API
//!
//! This crate owns everything the HTTP gateway needs to talk to Permit.io:
//! the process configuration, the [`PermitApi`] seam with its reqwest-backed
//! implementation, and the resource-relationship sample page.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod relationships;

pub use client::{PermitApi, PermitClient};
pub use config::{CompleteConfig, PermitConfig, DEFAULT_API_URL};
pub use error::{GatewayError, Result};
pub use relationships::{RelationshipPage, ResourceRelationship};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
