//! Station ranking by observation count

use crate::query::error::{QueryError, QueryResult};
use crate::storage::MeasurementStore;

/// Station with the most observations
///
/// Ties go to the lexicographically lowest station identifier.
pub async fn most_active_station(store: &dyn MeasurementStore) -> QueryResult<String> {
    let activity = store.station_activity().await?;

    let station = pick_most_active(activity).ok_or(QueryError::EmptyStore)?;
    tracing::debug!(station = %station, "Selected most active station");
    Ok(station)
}

fn pick_most_active(activity: Vec<(String, u64)>) -> Option<String> {
    activity
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .max_by(|(a, count_a), (b, count_b)| count_a.cmp(count_b).then_with(|| b.cmp(a)))
        .map(|(station, _)| station)
}
