//! Query error types
//!
//! Defines all error conditions that can occur while answering a query.

use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// No observations to derive a reference date or ranking from
    #[error("Store contains no observations")]
    EmptyStore,

    /// Input date is not a valid `YYYY-MM-DD` date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// End date precedes start date
    #[error("Invalid range: end date {end} is before start date {start}")]
    InvalidRange { start: String, end: String },

    /// The filter matched no observations
    #[error("No observations match the requested dates")]
    NoMatchingRecords,

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::InvalidDate("2017-8-1".to_string());
        assert_eq!(err.to_string(), "Invalid date '2017-8-1': expected YYYY-MM-DD");

        let err = QueryError::InvalidRange {
            start: "2017-08-23".to_string(),
            end: "2017-08-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid range: end date 2017-08-01 is before start date 2017-08-23"
        );
    }
}
