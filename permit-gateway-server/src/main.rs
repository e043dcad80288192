//! Permit Gateway HTTP Server binary

use permit_gateway_core::PermitConfig;
use permit_gateway_server::{build_router, AppState};
use std::net::SocketAddr;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    let enable_otel = std::env::var("OTEL_ENABLED")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if enable_otel {
        permit_gateway_server::tracing::init_tracing_stack("permit-gateway")?;
        info!("OpenTelemetry tracing enabled");
    } else {
        permit_gateway_server::tracing::init_console_logging()?;
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting Permit Gateway v{}", env!("CARGO_PKG_VERSION"));

    permit_gateway_server::metrics::init_prometheus()?;
    permit_gateway_server::metrics::init_metrics();

    let config = PermitConfig::from_env();
    if config.is_complete() {
        info!(
            api_url = %config.api_url,
            project = ?config.project_id,
            environment = ?config.environment_id,
            "Permit.io configuration loaded"
        );
    } else {
        warn!(
            missing = ?config.missing_keys(),
            "Permit.io configuration is incomplete; relayed endpoints will return 500"
        );
    }

    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDRESS")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if enable_otel {
        info!("Flushing OpenTelemetry traces...");
        permit_gateway_server::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
