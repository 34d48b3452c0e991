//! SQLite-backed measurement store
//!
//! Reads a pre-populated database with `measurement` and `station` tables.
//! Every store call opens its own read-only connection on a blocking
//! thread and closes it before returning, so no connection or lock outlives
//! a single read.

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::store::MeasurementStore;
use crate::storage::types::{Observation, ObservationFilter, Station};

const OBSERVATION_COLUMNS: &str = "station, date, prcp, tobs";
const STATION_COLUMNS: &str = "station, name, latitude, longitude, elevation";

/// Read-only SQLite store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open a store and check that the expected schema is present
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(StorageError::Config(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let conn = open_read_only(&path)?;
        verify_schema(&conn)?;

        tracing::info!("Opened observation store at {:?}", path);
        Ok(Self { path })
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a fresh read-only connection on a blocking thread
    async fn with_connection<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = open_read_only(&path)?;
            f(&conn)
        })
        .await?
    }
}

fn open_read_only(path: &Path) -> StorageResult<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA query_only = ON")?;
    Ok(conn)
}

/// Preparing a statement fails if a table or column is missing
fn verify_schema(conn: &Connection) -> StorageResult<()> {
    conn.prepare(&format!("SELECT {} FROM measurement LIMIT 0", OBSERVATION_COLUMNS))
        .map_err(|e| StorageError::Config(format!("measurement table: {}", e)))?;
    conn.prepare(&format!("SELECT {} FROM station LIMIT 0", STATION_COLUMNS))
        .map_err(|e| StorageError::Config(format!("station table: {}", e)))?;
    Ok(())
}

fn observation_from_row(row: &Row<'_>) -> rusqlite::Result<Observation> {
    Ok(Observation {
        station: row.get(0)?,
        date: row.get(1)?,
        prcp: row.get(2)?,
        tobs: row.get(3)?,
    })
}

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station {
        station: row.get(0)?,
        name: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        elevation: row.get(4)?,
    })
}

/// Build the observation scan; date bounds compare as text
fn observation_query(filter: &ObservationFilter) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    if let Some(ref station) = filter.station {
        params.push(station.clone());
        clauses.push(format!("station = ?{}", params.len()));
    }
    if let Some(ref since) = filter.since {
        params.push(since.clone());
        clauses.push(format!("date >= ?{}", params.len()));
    }
    if let Some(ref until) = filter.until {
        params.push(until.clone());
        clauses.push(format!("date <= ?{}", params.len()));
    }

    let mut sql = format!("SELECT {} FROM measurement", OBSERVATION_COLUMNS);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY rowid");

    (sql, params)
}

#[async_trait]
impl MeasurementStore for SqliteStore {
    async fn latest_date(&self) -> StorageResult<Option<String>> {
        self.with_connection(|conn| {
            let date: Option<String> =
                conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
            tracing::debug!(latest = ?date, "Resolved latest observation date");
            Ok(date)
        })
        .await
    }

    async fn station_activity(&self) -> StorageResult<Vec<(String, u64)>> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT station, COUNT(*) FROM measurement GROUP BY station")?;
            let rows = stmt.query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok((row.get::<_, String>(0)?, count.max(0) as u64))
            })?;

            let mut activity = Vec::new();
            for row in rows {
                activity.push(row?);
            }
            tracing::debug!("Counted observations for {} stations", activity.len());
            Ok(activity)
        })
        .await
    }

    async fn observations(&self, filter: &ObservationFilter) -> StorageResult<Vec<Observation>> {
        let (sql, params) = observation_query(filter);

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
                observation_from_row(row)
            })?;

            let mut observations = Vec::new();
            for row in rows {
                observations.push(row?);
            }
            tracing::debug!("Scanned {} observations", observations.len());
            Ok(observations)
        })
        .await
    }

    async fn stations(&self) -> StorageResult<Vec<Station>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM station ORDER BY rowid",
                STATION_COLUMNS
            ))?;
            let rows = stmt.query_map([], station_from_row)?;

            let mut stations = Vec::new();
            for row in rows {
                stations.push(row?);
            }
            Ok(stations)
        })
        .await
    }

    async fn ping(&self) -> StorageResult<()> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
        .await
    }
}
