//! Climate Query Engine
//!
//! Answers the service's aggregate questions over a `MeasurementStore`:
//!
//! - **window**: Trailing-year window anchored on the latest stored date
//! - **ranker**: Most active station by observation count
//! - **aggregate**: Filtered series and min/avg/max temperature statistics
//! - **facade**: `ClimateQueries`, the operations exposed to the API
//!
//! # Query Pipeline
//!
//! ```text
//! ClimateQueries → {window, ranker, aggregate} → MeasurementStore
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use climate::query::ClimateQueries;
//! use climate::storage::SqliteStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::open("Resources/hawaii.sqlite")?);
//! let queries = ClimateQueries::new(store);
//!
//! let tobs = queries.get_tobs().await?;
//! let report = queries.get_stats_range("2017-01-01", "2017-01-31").await?;
//! ```

mod aggregate;
mod error;
mod facade;
mod ranker;
mod window;

pub use aggregate::{
    precipitation_series, station_list, temperature_series, temperature_stats, TemperatureStats,
};
pub use error::{QueryError, QueryResult};
pub use facade::{ClimateQueries, StatsReport};
pub use ranker::most_active_station;
pub use window::{parse_iso_date, resolve_trailing_window, TrailingWindow, TRAILING_WINDOW_DAYS};
