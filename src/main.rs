//! trisearch: a small metasearch aggregator
//!
//! This is the main entry point for the application.

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trisearch::{
    config,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting trisearch v{}", trisearch::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!(
        "Per-engine timeout: {} ms, client identifier: {}",
        settings.search.timeout_ms, settings.outgoing.user_agent
    );

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state
    let state = AppState::from_settings(settings)?;
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
