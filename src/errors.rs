//! Unified error type for the elevator log.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer
//! decides which variants are caller mistakes and which are internal failures.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// All errors produced by configuration, storage and the API.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration could not be read, parsed or applied
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the database, including constraint violations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Socket or file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A query range whose start is not before its end
    #[error("Invalid time range: {from} is not before {until}")]
    InvalidTimeRange {
        /// Requested start (inclusive)
        from: DateTime<Utc>,
        /// Requested end (exclusive)
        until: DateTime<Utc>,
    },

    /// The latest state was requested before any state was recorded
    #[error("No elevator state has been recorded yet")]
    NoStateRecorded,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
