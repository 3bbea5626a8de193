//! Request and response bodies of the HTTP API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::core::{NewDemand, NewState, TimeRange};
use crate::errors::Result;

/// Body of `POST /state`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStateRequest {
    /// Floor the car is at
    pub current_floor: i32,
    /// Whether the car is unoccupied
    pub vacant: bool,
    /// Whether the car is moving
    #[serde(rename = "mooving", alias = "moving")]
    pub moving: bool,
    /// Sample time; omitted means now
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub state_time: Option<DateTime<Utc>>,
}

impl From<CreateStateRequest> for NewState {
    fn from(req: CreateStateRequest) -> Self {
        Self {
            current_floor: req.current_floor,
            vacant: req.vacant,
            moving: req.moving,
            state_time: req.state_time,
        }
    }
}

/// Body of `POST /demand`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDemandRequest {
    /// Floor the call came from
    pub demand_floor: i32,
    /// Call time; omitted means now
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub demand_time: Option<DateTime<Utc>>,
}

impl From<CreateDemandRequest> for NewDemand {
    fn from(req: CreateDemandRequest) -> Self {
        Self {
            demand_floor: req.demand_floor,
            demand_time: req.demand_time,
        }
    }
}

/// `?from=..&until=..` on the listing endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeRangeQuery {
    /// Inclusive lower bound
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub until: Option<DateTime<Utc>>,
}

impl TimeRangeQuery {
    /// Converts into a validated [`TimeRange`].
    pub fn into_range(self) -> Result<TimeRange> {
        TimeRange::new(self.from, self.until)
    }
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the service can reach its database
    pub healthy: bool,
    /// `"ok"` or the database error
    pub database: String,
}

/// Parses an RFC 3339 timestamp, or a naive ISO-8601 date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
    })
    .transpose()
}
