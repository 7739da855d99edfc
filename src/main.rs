//! CaseDesk Server — Complaint Management Backend Core
//!
//! Main entry point that wires all crates together and runs the service.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use casedesk_core::config::AppConfig;
use casedesk_core::error::AppError;
use casedesk_realtime::BroadcastHub;
use casedesk_service::ComplaintService;
use casedesk_storage::LocalFileStore;
use casedesk_store::MemoryComplaintStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CASEDESK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CaseDesk v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryComplaintStore::new());
    let files = Arc::new(LocalFileStore::new(&config.storage).await?);
    let hub = Arc::new(BroadcastHub::new(config.realtime.clone()));

    // The HTTP/WebSocket transport boundary plugs in here: it registers
    // connections on the hub and calls into the service with authenticated
    // actors. The core runs until interrupted.
    let _complaints = ComplaintService::new(store, files, hub.clone());

    let heartbeat = hub.spawn_heartbeat();
    tracing::info!(
        ping_interval_seconds = config.realtime.ping_interval_seconds,
        "Broadcast hub ready"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutting down");
    heartbeat.abort();
    hub.close_all();

    Ok(())
}
