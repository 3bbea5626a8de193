//! Half-open time windows used to narrow state and demand listings.
//!
//! Ranges are applied to decoded timestamps, never to the stored text: rows
//! written with the column default (`CURRENT_TIMESTAMP`) and rows written by
//! the service use different text formats.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};

/// `from <= t < until`, either end optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound
    pub until: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// A range without bounds.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            until: None,
        }
    }

    /// Builds a range, rejecting one whose start is not before its end.
    pub fn new(from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Result<Self> {
        let range = Self { from, until };
        range.validate()?;
        Ok(range)
    }

    /// Checks that `from < until` when both ends are given.
    pub fn validate(&self) -> Result<()> {
        match (self.from, self.until) {
            (Some(from), Some(until)) if from >= until => {
                Err(Error::InvalidTimeRange { from, until })
            }
            _ => Ok(()),
        }
    }

    /// Whether `time` falls inside the range.
    #[must_use]
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| from <= time) && self.until.is_none_or(|until| time < until)
    }

    /// Keeps the rows inside the range, ordered by the `(time, id)` that `key`
    /// extracts.
    pub(crate) fn apply<T, F>(&self, mut rows: Vec<T>, key: F) -> Vec<T>
    where
        F: Fn(&T) -> (DateTime<Utc>, i64),
    {
        rows.retain(|row| self.contains(key(row).0));
        rows.sort_by_key(&key);
        rows
    }
}
