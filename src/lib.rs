//! # Climate
//!
//! A read-only query service over a fixed climate-observation dataset:
//! daily precipitation and temperature readings tagged by weather station
//! and date.
//!
//! ## Features
//!
//! - **Trailing-year windows**: anchored on the dataset's own latest date
//! - **Station ranking**: most active station with a deterministic tie-break
//! - **Temperature statistics**: min/avg/max over inclusive date ranges
//! - **Read-only storage**: SQLite opened read-only, one connection per read
//!
//! ## Modules
//!
//! - [`storage`]: Observation store trait and its SQLite/in-memory backends
//! - [`query`]: Window resolution, ranking, aggregation and the query facade
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use climate::query::ClimateQueries;
//! use climate::storage::SqliteStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SqliteStore::open("Resources/hawaii.sqlite")?);
//!     let queries = ClimateQueries::new(store);
//!
//!     let stations = queries.get_stations().await?;
//!     let report = queries.get_stats_from("2017-01-01").await?;
//!
//!     println!("{} stations, stats since 2017: {:?}", stations.len(), report.stats);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod query;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    MeasurementStore, MemoryStore, Observation, ObservationFilter, SqliteStore, Station,
    StorageError, StorageResult,
};

pub use query::{ClimateQueries, QueryError, QueryResult, StatsReport, TemperatureStats, TrailingWindow};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
