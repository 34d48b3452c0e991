//! Climate Routes
//!
//! Read-only endpoints over the observation dataset.
//!
//! - GET / - Route index
//! - GET /api/v1.0/precipitation - Precipitation by date, trailing year
//! - GET /api/v1.0/stations - Station identifiers
//! - GET /api/v1.0/tobs - Most active station's temperatures, trailing year
//! - GET /api/v1.0/:start - Temperature stats from a date
//! - GET /api/v1.0/:start/:end - Temperature stats for a date range

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::StatsResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

const INDEX_HTML: &str = r#"<h1>Welcome to the Climate API</h1>
<p>Available Routes:</p>
<ul>
    <li>/api/v1.0/precipitation</li>
    <li>/api/v1.0/stations</li>
    <li>/api/v1.0/tobs</li>
    <li>/api/v1.0/&lt;start&gt;</li>
    <li>/api/v1.0/&lt;start&gt;/&lt;end&gt;</li>
</ul>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/v1.0/precipitation
///
/// Maps each date in the trailing year to its precipitation (or null).
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, Option<f64>>>> {
    let by_date = state.queries.get_precipitation().await?;
    Ok(Json(by_date))
}

/// GET /api/v1.0/stations
pub async fn stations(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let stations = state.queries.get_stations().await?;
    Ok(Json(stations))
}

/// GET /api/v1.0/tobs
pub async fn tobs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<f64>>> {
    let temperatures = state.queries.get_tobs().await?;
    Ok(Json(temperatures))
}

/// GET /api/v1.0/:start
pub async fn stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> ApiResult<Json<StatsResponse>> {
    let report = state.queries.get_stats_from(&start).await?;
    Ok(Json(report.into()))
}

/// GET /api/v1.0/:start/:end
pub async fn stats_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Json<StatsResponse>> {
    let report = state.queries.get_stats_range(&start, &end).await?;
    Ok(Json(report.into()))
}
