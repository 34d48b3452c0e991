//! Query Facade
//!
//! The five operations served by the HTTP layer. Each call resolves the
//! window and ranking afresh against the store; nothing is cached between
//! calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::query::aggregate::{self, TemperatureStats};
use crate::query::error::{QueryError, QueryResult};
use crate::query::ranker::most_active_station;
use crate::query::window::{parse_iso_date, resolve_trailing_window};
use crate::storage::MeasurementStore;

/// Result of a stats query
///
/// `stats` is `None` when no observation falls inside the range.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub start: String,
    pub end: Option<String>,
    pub stats: Option<TemperatureStats>,
}

/// Entry point for all climate queries
#[derive(Clone)]
pub struct ClimateQueries {
    store: Arc<dyn MeasurementStore>,
}

impl ClimateQueries {
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self { store }
    }

    /// Precipitation by date over the trailing year
    ///
    /// When several observations share a date, the last one in date order
    /// (then store order) wins.
    pub async fn get_precipitation(&self) -> QueryResult<BTreeMap<String, Option<f64>>> {
        let window = resolve_trailing_window(self.store.as_ref()).await?;
        let series = aggregate::precipitation_series(self.store.as_ref(), &window.start_key()).await?;

        let mut by_date = BTreeMap::new();
        for (date, prcp) in series {
            by_date.insert(date, prcp);
        }
        Ok(by_date)
    }

    /// All station identifiers
    pub async fn get_stations(&self) -> QueryResult<Vec<String>> {
        aggregate::station_list(self.store.as_ref()).await
    }

    /// Temperatures at the most active station over the trailing year
    pub async fn get_tobs(&self) -> QueryResult<Vec<f64>> {
        let station = most_active_station(self.store.as_ref()).await?;
        let window = resolve_trailing_window(self.store.as_ref()).await?;

        aggregate::temperature_series(self.store.as_ref(), &station, &window.start_key()).await
    }

    /// Temperature stats from `start` through the end of the data
    pub async fn get_stats_from(&self, start: &str) -> QueryResult<StatsReport> {
        parse_iso_date(start)?;

        let stats = recover_no_matches(
            aggregate::temperature_stats(self.store.as_ref(), start, None).await,
        )?;

        Ok(StatsReport {
            start: start.to_string(),
            end: None,
            stats,
        })
    }

    /// Temperature stats for `start <= date <= end`
    pub async fn get_stats_range(&self, start: &str, end: &str) -> QueryResult<StatsReport> {
        let start_date = parse_iso_date(start)?;
        let end_date = parse_iso_date(end)?;

        if end_date < start_date {
            return Err(QueryError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let stats = recover_no_matches(
            aggregate::temperature_stats(self.store.as_ref(), start, Some(end)).await,
        )?;

        Ok(StatsReport {
            start: start.to_string(),
            end: Some(end.to_string()),
            stats,
        })
    }

    /// Check the underlying store is reachable
    pub async fn health_check(&self) -> QueryResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}

/// An empty range reports null statistics rather than an error
fn recover_no_matches(
    result: QueryResult<TemperatureStats>,
) -> QueryResult<Option<TemperatureStats>> {
    match result {
        Ok(stats) => Ok(Some(stats)),
        Err(QueryError::NoMatchingRecords) => {
            tracing::debug!("No observations in range, reporting null stats");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Observation, Station};

    fn queries(observations: Vec<Observation>, stations: Vec<Station>) -> ClimateQueries {
        ClimateQueries::new(Arc::new(MemoryStore::new(observations, stations)))
    }

    fn hawaii() -> ClimateQueries {
        queries(
            vec![
                Observation::new("USC00519281", "2016-08-22", 77.0).prcp(0.1),
                Observation::new("USC00519281", "2016-08-23", 77.0).prcp(1.79),
                Observation::new("USC00519397", "2016-08-23", 81.0).prcp(0.0),
                Observation::new("USC00519281", "2017-08-18", 79.0),
                Observation::new("USC00519397", "2017-08-23", 81.0).prcp(0.0),
                Observation::new("USC00519281", "2017-08-22", 76.0).prcp(0.5),
            ],
            vec![Station::new("USC00519397"), Station::new("USC00519281")],
        )
    }

    #[tokio::test]
    async fn test_get_precipitation() {
        let result = hawaii().get_precipitation().await.unwrap();

        let dates: Vec<&str> = result.keys().map(|d| d.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-08-18", "2017-08-22", "2017-08-23"]);

        // Duplicate date: later store record wins
        assert_eq!(result["2016-08-23"], Some(0.0));
        assert_eq!(result["2017-08-18"], None);
        assert_eq!(result["2017-08-22"], Some(0.5));
    }

    #[tokio::test]
    async fn test_get_precipitation_empty_store() {
        let result = queries(vec![], vec![]).get_precipitation().await;
        assert!(matches!(result, Err(QueryError::EmptyStore)));
    }

    #[tokio::test]
    async fn test_get_stations() {
        let result = hawaii().get_stations().await.unwrap();
        assert_eq!(result, vec!["USC00519397", "USC00519281"]);
    }

    #[tokio::test]
    async fn test_get_tobs() {
        let result = hawaii().get_tobs().await.unwrap();
        assert_eq!(result, vec![77.0, 79.0, 76.0]);
    }

    #[tokio::test]
    async fn test_get_tobs_empty_store() {
        let result = queries(vec![], vec![Station::new("A")]).get_tobs().await;
        assert!(matches!(result, Err(QueryError::EmptyStore)));
    }

    #[tokio::test]
    async fn test_get_stats_from() {
        let q = queries(
            vec![
                Observation::new("A", "2017-08-20", 0.5),
                Observation::new("A", "2017-08-23", 1.2),
            ],
            vec![],
        );

        let report = q.get_stats_from("2017-08-20").await.unwrap();
        assert_eq!(report.start, "2017-08-20");
        assert_eq!(report.end, None);

        let stats = report.stats.unwrap();
        assert_eq!(stats.min, 0.5);
        assert!((stats.avg - 0.85).abs() < 1e-12);
        assert_eq!(stats.max, 1.2);
    }

    #[tokio::test]
    async fn test_get_stats_from_invalid_date() {
        let result = hawaii().get_stats_from("August 1st").await;
        assert!(matches!(result, Err(QueryError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_get_stats_from_without_matches() {
        let report = hawaii().get_stats_from("2020-01-01").await.unwrap();
        assert_eq!(report.stats, None);
    }

    #[tokio::test]
    async fn test_get_stats_range() {
        let report = hawaii()
            .get_stats_range("2017-08-18", "2017-08-22")
            .await
            .unwrap();

        assert_eq!(report.end.as_deref(), Some("2017-08-22"));
        let stats = report.stats.unwrap();
        assert_eq!(stats.min, 76.0);
        assert_eq!(stats.max, 79.0);
        assert!((stats.avg - 77.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_get_stats_range_inverted() {
        let result = hawaii().get_stats_range("2017-08-23", "2016-08-23").await;
        assert!(matches!(result, Err(QueryError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_get_stats_range_invalid_end() {
        let result = hawaii().get_stats_range("2017-08-01", "2017-13-01").await;
        assert!(matches!(result, Err(QueryError::InvalidDate(ref d)) if d == "2017-13-01"));
    }
}
