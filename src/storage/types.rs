//! Core data types for the observation store
//!
//! Records are mapped field-by-field from the fixed storage schema:
//!
//! ```text
//! measurement(id, station, date, prcp, tobs)
//! station(id, station, name, latitude, longitude, elevation)
//! ```

use serde::{Deserialize, Serialize};

/// Date format shared by the store and every query boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single daily observation from one station
///
/// `date` is kept as the stored ISO string. Because the format is fixed
/// (`YYYY-MM-DD`), string order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Station identifier, e.g. "USC00519281"
    pub station: String,
    /// Observation date (`YYYY-MM-DD`)
    pub date: String,
    /// Precipitation; `None` when not recorded
    pub prcp: Option<f64>,
    /// Observed temperature
    pub tobs: f64,
}

impl Observation {
    pub fn new(station: impl Into<String>, date: impl Into<String>, tobs: f64) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp: None,
            tobs,
        }
    }

    /// Set the precipitation reading
    pub fn prcp(mut self, prcp: f64) -> Self {
        self.prcp = Some(prcp);
        self
    }
}

/// A weather station
///
/// Only `station` is used by queries; the rest is descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Station {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: None,
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64, elevation: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.elevation = Some(elevation);
        self
    }
}

/// Filter for observation scans
///
/// Date bounds are inclusive and compared as strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationFilter {
    /// Only this station
    pub station: Option<String>,
    /// `date >= since`
    pub since: Option<String>,
    /// `date <= until`
    pub until: Option<String>,
}

impl ObservationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub fn since(mut self, date: impl Into<String>) -> Self {
        self.since = Some(date.into());
        self
    }

    pub fn until(mut self, date: impl Into<String>) -> Self {
        self.until = Some(date.into());
        self
    }

    /// Check if an observation matches this filter
    pub fn matches(&self, obs: &Observation) -> bool {
        if let Some(ref station) = self.station {
            if obs.station != *station {
                return false;
            }
        }

        if let Some(ref since) = self.since {
            if obs.date.as_str() < since.as_str() {
                return false;
            }
        }

        if let Some(ref until) = self.until {
            if obs.date.as_str() > until.as_str() {
                return false;
            }
        }

        true
    }
}
