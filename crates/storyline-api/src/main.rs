//! Storyline API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use storyline_api::config::AppConfig;
use storyline_api::error::AppError;
use storyline_api::state::AppState;
use storyline_core::clock::{Clock, SystemClock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Storyline API server");

    let config = AppConfig::from_env()?;
    let playback = config.playback()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Load the catalog once; it is read-only afterwards.
    let catalog = config
        .catalog_source(Arc::clone(&clock))
        .load()
        .await
        .map_err(AppError::Catalog)?;
    tracing::info!(
        profiles = catalog.profiles().len(),
        collections = catalog.story_line().len(),
        story_duration_ms = playback.story_duration().as_millis(),
        fps = playback.fps(),
        "catalog loaded"
    );

    let app_state = AppState::new(catalog, playback, clock).map_err(AppError::Catalog)?;

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = storyline_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(AppError::Server)?;

    axum::serve(listener, app).await.map_err(AppError::Server)?;

    Ok(())
}
