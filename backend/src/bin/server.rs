//! Items HTTP Server Binary
//!
//! Builds the in-memory item store, sets up the HTTP router and serves requests
//! until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin items-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `RUST_LOG`: Log filter (default: info)

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use items_api::config::{ServerConfig, APP_TITLE, DOCS_PATH, VERSION};
use items_api::db::LocalRepository;
use items_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting {} v{}", APP_TITLE, VERSION);

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    let repository = Arc::new(LocalRepository::new());
    let app = create_router(AppState::new(repository));

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}{}", addr, DOCS_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
