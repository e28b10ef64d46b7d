//! # receipt-api binary
//!
//! Loads configuration, installs logging, and serves until Ctrl+C/SIGTERM.

use anyhow::Context;
use tracing::info;

use receipt_api::config::ApiConfig;
use receipt_api::server::{shutdown_signal, ApiServer};
use receipt_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: it decides the log format
    let config = ApiConfig::load().context("Failed to load configuration")?;

    init_tracing(config.log_format).context("Failed to initialize logging")?;

    info!("Starting Receipt API server...");
    info!(
        bind_addr = %config.bind_addr,
        max_body_bytes = config.max_body_bytes,
        request_timeout_secs = config.request_timeout_secs,
        log_format = %config.log_format,
        "Configuration loaded"
    );

    let server = ApiServer::new(config).bind().await?;
    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}
