//! In-memory measurement store
//!
//! Holds a fixed snapshot of observations and stations. Iteration order is
//! insertion order.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::error::StorageResult;
use crate::storage::store::MeasurementStore;
use crate::storage::types::{Observation, ObservationFilter, Station};

/// Immutable in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    observations: Vec<Observation>,
    stations: Vec<Station>,
}

impl MemoryStore {
    pub fn new(observations: Vec<Observation>, stations: Vec<Station>) -> Self {
        Self {
            observations,
            stations,
        }
    }

    /// Number of observations held
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[async_trait]
impl MeasurementStore for MemoryStore {
    async fn latest_date(&self) -> StorageResult<Option<String>> {
        Ok(self.observations.iter().map(|o| &o.date).max().cloned())
    }

    async fn station_activity(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for obs in &self.observations {
            *counts.entry(obs.station.as_str()).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(station, count)| (station.to_string(), count))
            .collect())
    }

    async fn observations(&self, filter: &ObservationFilter) -> StorageResult<Vec<Observation>> {
        Ok(self
            .observations
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn stations(&self) -> StorageResult<Vec<Station>> {
        Ok(self.stations.clone())
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_date() {
        let store = MemoryStore::new(
            vec![
                Observation::new("A", "2016-12-31", 70.0),
                Observation::new("B", "2017-01-02", 71.0),
                Observation::new("A", "2017-01-01", 72.0),
            ],
            vec![],
        );

        assert_eq!(store.latest_date().await.unwrap().as_deref(), Some("2017-01-02"));
        assert_eq!(MemoryStore::default().latest_date().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_station_activity() {
        let store = MemoryStore::new(
            vec![
                Observation::new("A", "2017-01-01", 70.0),
                Observation::new("B", "2017-01-01", 71.0),
                Observation::new("A", "2017-01-02", 72.0),
            ],
            vec![],
        );

        let mut activity = store.station_activity().await.unwrap();
        activity.sort();
        assert_eq!(activity, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_observations_keep_insertion_order() {
        let store = MemoryStore::new(
            vec![
                Observation::new("A", "2017-01-03", 1.0),
                Observation::new("A", "2017-01-01", 2.0),
                Observation::new("A", "2017-01-02", 3.0),
            ],
            vec![],
        );

        let result = store
            .observations(&ObservationFilter::new().since("2017-01-02"))
            .await
            .unwrap();
        let values: Vec<f64> = result.iter().map(|o| o.tobs).collect();
        assert_eq!(values, vec![1.0, 3.0]);
    }
}
