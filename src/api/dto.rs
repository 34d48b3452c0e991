//! Data Transfer Objects
//!
//! Response types for the API endpoints. Series endpoints serialize plain
//! maps and vectors; only stats and health need dedicated shapes.

use serde::Serialize;

use crate::query::StatsReport;

/// Temperature stats response
///
/// `End Date` is only present for range queries. The temperature fields
/// are `null` when no observations fall inside the range.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

impl From<StatsReport> for StatsResponse {
    fn from(report: StatsReport) -> Self {
        Self {
            start_date: report.start,
            end_date: report.end,
            tmin: report.stats.map(|s| s.min),
            tavg: report.stats.map(|s| s.avg),
            tmax: report.stats.map(|s| s.max),
        }
    }
}

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Store status: "ok" or "error"
    pub store: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
