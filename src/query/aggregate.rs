//! Aggregation Engine
//!
//! Filtered series extraction and temperature statistics over the store.
//!
//! # Ordering
//!
//! - `precipitation_series` is sorted ascending by date (stable, so records
//!   sharing a date keep store order).
//! - `temperature_series` keeps store iteration order.
//! - `station_list` keeps station enumeration order.
//!
//! # Precision
//!
//! Statistics are IEEE-754 doubles. The mean is `sum / count` with no
//! rounding applied.

use serde::Serialize;

use crate::query::error::{QueryError, QueryResult};
use crate::storage::{MeasurementStore, ObservationFilter};

/// Minimum, mean and maximum temperature over a set of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl TemperatureStats {
    /// Single pass over `values`; `None` when there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            avg: sum / count as f64,
            max,
        })
    }
}

/// Date and precipitation for every observation on or after `since`
pub async fn precipitation_series(
    store: &dyn MeasurementStore,
    since: &str,
) -> QueryResult<Vec<(String, Option<f64>)>> {
    let mut observations = store
        .observations(&ObservationFilter::new().since(since))
        .await?;

    observations.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(observations
        .into_iter()
        .map(|obs| (obs.date, obs.prcp))
        .collect())
}

/// Identifiers of every station
pub async fn station_list(store: &dyn MeasurementStore) -> QueryResult<Vec<String>> {
    let stations = store.stations().await?;
    Ok(stations.into_iter().map(|s| s.station).collect())
}

/// Temperatures observed at `station` on or after `since`
pub async fn temperature_series(
    store: &dyn MeasurementStore,
    station: &str,
    since: &str,
) -> QueryResult<Vec<f64>> {
    let observations = store
        .observations(&ObservationFilter::new().station(station).since(since))
        .await?;

    Ok(observations.into_iter().map(|obs| obs.tobs).collect())
}

/// Temperature statistics for `start <= date <= end`
///
/// Without `end` the range is open-ended. Fails with `InvalidRange` when
/// `end < start` (without touching the store) and with `NoMatchingRecords`
/// when nothing falls inside the range.
pub async fn temperature_stats(
    store: &dyn MeasurementStore,
    start: &str,
    end: Option<&str>,
) -> QueryResult<TemperatureStats> {
    let mut filter = ObservationFilter::new().since(start);

    if let Some(end) = end {
        if end < start {
            return Err(QueryError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        filter = filter.until(end);
    }

    let observations = store.observations(&filter).await?;
    let matched = observations.len();

    let stats = TemperatureStats::from_values(observations.into_iter().map(|obs| obs.tobs))
        .ok_or(QueryError::NoMatchingRecords)?;

    tracing::debug!(start, end = ?end, matched, "Computed temperature stats");
    Ok(stats)
}
