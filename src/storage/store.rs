//! Measurement store abstraction
//!
//! The query layer only ever reads through this trait. Implementations
//! must be safe to call concurrently and must not keep state between calls.

use async_trait::async_trait;

use crate::storage::error::StorageResult;
use crate::storage::types::{Observation, ObservationFilter, Station};

/// Read-only access to the observation and station collections
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Latest observation date, or `None` if there are no observations
    async fn latest_date(&self) -> StorageResult<Option<String>>;

    /// Number of observations per station, in no particular order
    async fn station_activity(&self) -> StorageResult<Vec<(String, u64)>>;

    /// Observations matching `filter`, in store iteration order
    async fn observations(&self, filter: &ObservationFilter) -> StorageResult<Vec<Observation>>;

    /// All stations, in enumeration order
    async fn stations(&self) -> StorageResult<Vec<Station>>;

    /// Verify the store is reachable
    async fn ping(&self) -> StorageResult<()>;
}
