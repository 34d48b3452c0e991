//! Observation Store
//!
//! Read-only access to the climate dataset:
//!
//! - **types**: Record types (Observation, Station, ObservationFilter)
//! - **store**: The `MeasurementStore` trait the query layer reads through
//! - **sqlite**: SQLite implementation over the fixed `measurement`/`station` schema
//! - **memory**: In-memory implementation
//! - **error**: Error types
//!
//! # Read Path
//!
//! ```text
//! Query → MeasurementStore → open read-only connection → SELECT → map rows → close
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use climate::storage::{MeasurementStore, ObservationFilter, SqliteStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::open("Resources/hawaii.sqlite")?;
//!
//!     let latest = store.latest_date().await?;
//!     let recent = store
//!         .observations(&ObservationFilter::new().since("2017-08-01"))
//!         .await?;
//!
//!     println!("{} observations since 2017-08-01 (latest {:?})", recent.len(), latest);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::MeasurementStore;
pub use types::{Observation, ObservationFilter, Station, DATE_FORMAT};
