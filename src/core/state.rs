//! State business logic - recording and reading samples of the elevator car.
//!
//! States are append-only: the service inserts one row per observed change and
//! never updates or deletes rows.

use crate::{
    core::time_range::TimeRange,
    entities::{State, StateColumn, state},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, instrument};

/// A state sample to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewState {
    /// Floor the car is at
    pub current_floor: i32,
    /// Whether the car is unoccupied
    pub vacant: bool,
    /// Whether the car is in motion
    pub moving: bool,
    /// Sample time; `None` records the current time
    pub state_time: Option<DateTime<Utc>>,
}

/// Records a new state sample and returns the stored row.
#[instrument(skip(db))]
pub async fn record_state(db: &DatabaseConnection, new_state: NewState) -> Result<state::Model> {
    let model = state::ActiveModel {
        current_floor: Set(new_state.current_floor),
        state_time: Set(new_state.state_time.unwrap_or_else(Utc::now)),
        vacant: Set(new_state.vacant),
        moving: Set(new_state.moving),
        ..Default::default()
    };

    let stored = model.insert(db).await?;
    info!(
        state_id = stored.id,
        floor = stored.current_floor,
        "Recorded elevator state"
    );
    Ok(stored)
}

/// Lists states inside `range`, oldest first.
///
/// Samples sharing a timestamp keep their insertion order.
#[instrument(skip(db))]
pub async fn list_states(db: &DatabaseConnection, range: TimeRange) -> Result<Vec<state::Model>> {
    range.validate()?;
    let states = range.apply(State::find().all(db).await?, |s| (s.state_time, s.id));
    debug!(count = states.len(), "Fetched elevator states");
    Ok(states)
}

/// Returns the most recent state sample, if any was recorded.
pub async fn latest_state(db: &DatabaseConnection) -> Result<Option<state::Model>> {
    let states = State::find().all(db).await?;
    Ok(states.into_iter().max_by_key(|s| (s.state_time, s.id)))
}

/// Every resting state (vacant and not moving), ordered by time then id.
pub(crate) async fn resting_states(db: &DatabaseConnection) -> Result<Vec<state::Model>> {
    let mut states = State::find()
        .filter(StateColumn::Vacant.eq(true))
        .filter(StateColumn::Moving.eq(false))
        .all(db)
        .await?;
    states.sort_by_key(|s| (s.state_time, s.id));
    Ok(states)
}
