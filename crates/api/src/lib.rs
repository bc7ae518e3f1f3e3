//! Consumption Tracker API Server
//!
//! REST API server for the electricity consumption dashboard.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod routes;

pub use config::ApiConfig;
pub use error::ApiError;

use billing::AccountProfile;
use storage::ConsumptionStore;

/// Application state shared across handlers
pub struct AppState {
    /// Consumption record store
    pub store: ConsumptionStore,
    /// Account fields printed on bill statements
    pub account: AccountProfile,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a connected store
    pub fn new(store: ConsumptionStore) -> Self {
        Self {
            store,
            account: AccountProfile::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: String,
    pub record_count: i64,
}

/// Create the application router.
///
/// API routes first; anything else falls through to static serving of the
/// UI assets. CORS is open to any origin.
pub fn create_router(state: Arc<AppState>, ui_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route(
            "/api/consumption",
            post(routes::consumption::add_reading).get(routes::consumption::list_readings),
        )
        .route("/api/prediction", get(routes::prediction::get_prediction))
        .route("/api/statement", get(routes::statement::download_statement))
        .route("/api/health", get(health_handler))
        .with_state(state)
        .fallback_service(ServeDir::new(ui_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (database, record_count) = match state.store.record_count().await {
        Ok(count) => ("ok".to_string(), count),
        Err(err) => {
            error!("Health check could not reach database: {}", err);
            ("error".to_string(), 0)
        }
    };

    let response = HealthResponse {
        status: if database == "ok" { "healthy" } else { "degraded" }.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
        record_count,
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = ConsumptionStore::connect(&config.database_path).await?;
    let state = Arc::new(AppState::new(store));
    let app = create_router(state, &config.ui_dir);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
