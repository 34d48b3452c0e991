//! Date window resolution
//!
//! The trailing window is anchored on the latest date present in the
//! store, not on the wall clock. The boundary is computed with calendar
//! arithmetic, then compared against stored dates as strings.

use chrono::{Duration, NaiveDate};

use crate::query::error::{QueryError, QueryResult};
use crate::storage::{MeasurementStore, StorageError, DATE_FORMAT};

/// Length of the trailing window in days
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// The year of data ending at the store's reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    /// Latest observation date in the store
    pub reference_date: NaiveDate,
    /// `reference_date` minus 365 days
    pub window_start: NaiveDate,
}

impl TrailingWindow {
    pub fn ending_at(reference_date: NaiveDate) -> Option<Self> {
        let window_start = reference_date.checked_sub_signed(Duration::days(TRAILING_WINDOW_DAYS))?;
        Some(Self {
            reference_date,
            window_start,
        })
    }

    /// Window start in store format, for use as a `since` bound
    pub fn start_key(&self) -> String {
        self.window_start.format(DATE_FORMAT).to_string()
    }

    pub fn reference_key(&self) -> String {
        self.reference_date.format(DATE_FORMAT).to_string()
    }
}

/// Compute the trailing window from the store's latest observation date
pub async fn resolve_trailing_window(store: &dyn MeasurementStore) -> QueryResult<TrailingWindow> {
    let latest = store.latest_date().await?.ok_or(QueryError::EmptyStore)?;

    let reference_date = NaiveDate::parse_from_str(&latest, DATE_FORMAT).map_err(|e| {
        StorageError::Corruption(format!("stored date '{}' is not YYYY-MM-DD: {}", latest, e))
    })?;

    let window = TrailingWindow::ending_at(reference_date).ok_or_else(|| {
        StorageError::Corruption(format!("stored date '{}' is out of range", latest))
    })?;

    tracing::debug!(
        reference = %window.reference_date,
        start = %window.window_start,
        "Resolved trailing window"
    );
    Ok(window)
}

/// Parse a caller-supplied date, accepting only zero-padded `YYYY-MM-DD`
///
/// Filters compare dates as strings, so a date like `2017-8-1` must be
/// rejected even though chrono would accept it.
pub fn parse_iso_date(input: &str) -> QueryResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(input.to_string()))?;

    if date.format(DATE_FORMAT).to_string() != input {
        return Err(QueryError::InvalidDate(input.to_string()));
    }

    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Observation};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_from_latest_date() {
        let store = MemoryStore::new(
            vec![
                Observation::new("A", "2017-08-20", 80.0),
                Observation::new("B", "2017-08-23", 81.0),
                Observation::new("A", "2010-01-01", 65.0),
            ],
            vec![],
        );

        let window = resolve_trailing_window(&store).await.unwrap();
        assert_eq!(window.reference_date, date("2017-08-23"));
        assert_eq!(window.window_start, date("2016-08-23"));
        assert_eq!(window.start_key(), "2016-08-23");
        assert_eq!(window.reference_key(), "2017-08-23");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::default();
        let result = resolve_trailing_window(&store).await;
        assert!(matches!(result, Err(QueryError::EmptyStore)));
    }

    #[tokio::test]
    async fn test_malformed_stored_date() {
        let store = MemoryStore::new(vec![Observation::new("A", "23/08/2017", 80.0)], vec![]);
        let result = resolve_trailing_window(&store).await;
        assert!(matches!(
            result,
            Err(QueryError::Storage(StorageError::Corruption(_)))
        ));
    }

    #[test]
    fn test_window_spans_leap_day() {
        // 2016-02-29 lies inside the window
        let window = TrailingWindow::ending_at(date("2016-03-01")).unwrap();
        assert_eq!(window.window_start, date("2015-03-02"));

        let window = TrailingWindow::ending_at(date("2016-12-31")).unwrap();
        assert_eq!(window.window_start, date("2016-01-01"));
    }

    #[test]
    fn test_window_without_leap_day() {
        let window = TrailingWindow::ending_at(date("2017-03-01")).unwrap();
        assert_eq!(window.window_start, date("2016-03-01"));
    }

    #[test]
    fn test_window_is_always_365_days() {
        let mut reference = date("2015-01-01");
        while reference < date("2018-01-01") {
            let window = TrailingWindow::ending_at(reference).unwrap();
            assert_eq!((window.reference_date - window.window_start).num_days(), 365);
            reference = reference.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2017-08-23").unwrap(), date("2017-08-23"));
        assert_eq!(parse_iso_date("2016-02-29").unwrap(), date("2016-02-29"));
    }

    #[test]
    fn test_parse_iso_date_rejects_malformed() {
        for input in ["", "2017-8-1", "2017/08/23", "2017-02-30", "2017-08-23T00:00:00", "today"] {
            assert!(
                matches!(parse_iso_date(input), Err(QueryError::InvalidDate(_))),
                "accepted {:?}",
                input
            );
        }
    }
}
