//! Climate API Server
//!
//! Run with: cargo run --bin climate-api
//!
//! # Configuration
//!
//! Loaded from `config.toml` (see `climate-cli config`), with environment
//! overrides:
//! - `CLIMATE_DB_PATH`: SQLite database (default: Resources/hawaii.sqlite)
//! - `CLIMATE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CLIMATE_API_PORT`: Port to listen on (default: 5000)
//! - `CLIMATE_LOG_LEVEL`: Log level (default: info)
//! - `CLIMATE_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use climate::api::{serve, AppState};
use climate::config::{Config, LoggingConfig};
use climate::query::ClimateQueries;
use climate::storage::SqliteStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Climate API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {:?}", config.store.db_path);

    let store = Arc::new(SqliteStore::open(&config.store.db_path)?);
    let queries = Arc::new(ClimateQueries::new(store));

    let api_config = climate::api::ApiConfig::from(&config.api);
    let state = AppState::new(queries, api_config.clone());

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Climate API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("climate={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
