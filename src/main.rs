// Main entry point - Dependency injection and bridge setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::import_service::ImportService;
use crate::application::prediction_service::PredictionService;
use crate::application::record_service::RecordService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_client::TransportClient;
use crate::infrastructure::ice_data_api::HttpIceDataRepository;
use crate::infrastructure::session_store::SessionStore;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;

    // Restore or start the login session
    let session = Arc::new(match &config.session.store_path {
        Some(path) => SessionStore::load(path.clone()).await?,
        None => SessionStore::in_memory(),
    });

    // Create repository (infrastructure layer)
    let transport = TransportClient::new(&config.api, session.clone())?;
    let repository = Arc::new(HttpIceDataRepository::new(transport));

    // Create services (application layer)
    let record_service = RecordService::new(repository.clone());
    let import_service = ImportService::new(repository, config.import.chunk_size);
    let prediction_service = PredictionService::new(config.prediction.latency());

    let state = Arc::new(AppState {
        record_service,
        import_service,
        prediction_service,
        session,
    });

    // Start the bridge (presentation layer)
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        "seaice-bridge listening on {} (backend {})",
        listener.local_addr()?,
        config.api.base_url
    );

    axum::serve(listener, router(state)).await?;

    Ok(())
}
