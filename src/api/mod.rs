//! Climate REST API
//!
//! HTTP API layer for the climate query service, built with Axum.
//!
//! # Endpoints
//!
//! ## Index
//! - `GET /` - List available routes
//!
//! ## Climate
//! - `GET /api/v1.0/precipitation` - Precipitation by date over the trailing year
//! - `GET /api/v1.0/stations` - All station identifiers
//! - `GET /api/v1.0/tobs` - Temperatures at the most active station over the trailing year
//! - `GET /api/v1.0/:start` - TMIN/TAVG/TMAX from a start date
//! - `GET /api/v1.0/:start/:end` - TMIN/TAVG/TMAX for an inclusive date range
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use climate::api::{serve, ApiConfig, AppState};
//! use climate::query::ClimateQueries;
//! use climate::storage::SqliteStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SqliteStore::open("Resources/hawaii.sqlite")?);
//!     let queries = Arc::new(ClimateQueries::new(store));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(queries, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(routes::climate::precipitation))
        .route("/stations", get(routes::climate::stations))
        .route("/tobs", get(routes::climate::tobs))
        // Static segments above take priority over these captures
        .route("/:start", get(routes::climate::stats_from))
        .route("/:start/:end", get(routes::climate::stats_range));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::climate::index))
        .nest("/api/v1.0", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Climate API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Climate API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ClimateQueries;
    use crate::storage::{MemoryStore, Observation, Station};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app(observations: Vec<Observation>, stations: Vec<Station>) -> Router {
        let store = Arc::new(MemoryStore::new(observations, stations));
        let queries = Arc::new(ClimateQueries::new(store));
        build_router(AppState::new(queries, ApiConfig::default()))
    }

    fn hawaii_app() -> Router {
        create_test_app(
            vec![
                Observation::new("USC00519281", "2016-08-22", 77.0).prcp(0.1),
                Observation::new("USC00519281", "2016-08-23", 77.0).prcp(1.79),
                Observation::new("USC00519397", "2017-08-20", 0.5),
                Observation::new("USC00519281", "2017-08-23", 1.2).prcp(0.45),
            ],
            vec![Station::new("USC00519397"), Station::new("USC00519281")],
        )
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_routes() {
        let (status, body) = get(hawaii_app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("/api/v1.0/precipitation"));
        assert!(html.contains("/api/v1.0/tobs"));
    }

    #[tokio::test]
    async fn test_precipitation() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "2016-08-23": 1.79,
                "2017-08-20": null,
                "2017-08-23": 0.45,
            })
        );
    }

    #[tokio::test]
    async fn test_precipitation_empty_store() {
        let app = create_test_app(vec![], vec![]);
        let (status, body) = get_json(app, "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "EMPTY_STORE");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_stations() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/stations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["USC00519397", "USC00519281"]));
    }

    #[tokio::test]
    async fn test_tobs() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/tobs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([77.0, 1.2]));
    }

    #[tokio::test]
    async fn test_stats_from() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/2017-08-20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Start Date"], "2017-08-20");
        assert_eq!(body["TMIN"], 0.5);
        assert_eq!(body["TMAX"], 1.2);
        assert!((body["TAVG"].as_f64().unwrap() - 0.85).abs() < 1e-12);
        assert!(body.get("End Date").is_none());
    }

    #[tokio::test]
    async fn test_stats_range() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/2016-08-01/2016-08-31").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Start Date"], "2016-08-01");
        assert_eq!(body["End Date"], "2016-08-31");
        assert_eq!(body["TMIN"], 77.0);
        assert_eq!(body["TAVG"], 77.0);
        assert_eq!(body["TMAX"], 77.0);
    }

    #[tokio::test]
    async fn test_stats_without_matches_returns_nulls() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/2030-01-01").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["TMIN"].is_null());
        assert!(body["TAVG"].is_null());
        assert!(body["TMAX"].is_null());
    }

    #[tokio::test]
    async fn test_stats_invalid_date() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/not-a-date").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DATE");
    }

    #[tokio::test]
    async fn test_stats_inverted_range() {
        let (status, body) = get_json(hawaii_app(), "/api/v1.0/2017-08-23/2017-01-01").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get(hawaii_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = get(hawaii_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(hawaii_app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "ok");
    }
}
