//! Audit Insights HTTP Server Binary
//!
//! This is the main entry point for the audit analysis REST API server.
//! It loads configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin audit-server
//!
//! # With an explicit configuration file
//! AUDIT_CONFIG=/etc/audit-insights/audit.toml cargo run --bin audit-server
//! ```
//!
//! # Environment Variables
//!
//! - `AUDIT_CONFIG`: Path to a TOML configuration file (default: search for `audit.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use audit_insights::http::{create_router, AppState};
use audit_insights::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Audit Insights HTTP Server");

    let config = AppConfig::load()?;
    info!(
        zero_timestamp = ?config.metrics.zero_timestamp,
        max_upload_bytes = config.server.max_upload_bytes,
        "Configuration loaded"
    );

    let addr: SocketAddr = config.bind_address().parse()?;

    // Create application state and router with all endpoints
    let state = AppState::new(config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
