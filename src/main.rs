//! trailsync - Trail-Camera Photo Sync and Cache Server
//!
//! Main entry point.

use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trailsync::spypoint::SpypointClient;
use trailsync::state::{AppConfig, AppState};
use trailsync::store::{InMemoryStore, MySqlStore, TrailStore};
use trailsync::web_api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailsync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting trailsync v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(
        spypoint_url = %config.spypoint_url,
        cache_ttl_general_secs = config.cache_ttl_general_secs,
        cache_ttl_photo_secs = config.cache_ttl_photo_secs,
        photo_page_limit = config.photo_page_limit,
        "Configuration loaded"
    );

    // Select store backend
    let store: Arc<dyn TrailStore> = match config.database_url {
        Some(ref database_url) => {
            let pool = MySqlPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(10))
                .connect(database_url)
                .await?;
            let store = MySqlStore::new(pool);
            store.ensure_schema().await?;
            tracing::info!("Database connected, schema ensured");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (not durable)");
            Arc::new(InMemoryStore::new())
        }
    };

    // Vendor client and service graph
    let vendor = Arc::new(SpypointClient::new(config.spypoint_url.clone()));
    let state = AppState::build(config, store, vendor);

    let app = web_api::create_router(state.clone())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
