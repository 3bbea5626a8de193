//! Dataset generation for the resting-floor prediction model.
//!
//! A state is *resting* when the car is vacant and not moving. Two views are
//! produced from the stored rows:
//!
//! * [`training_dataset`] pairs every demand with the latest resting state at
//!   or before it, i.e. where the idle car was waiting when the call came in.
//! * [`event_timeline`] merges resting states and demands into one
//!   chronological stream.
//!
//! Both are computed on decoded timestamps, so rows written with different
//! timestamp text formats still order correctly.

use crate::{
    core::state::resting_states,
    entities::{Demand, demand, state},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One demand paired with the resting state that preceded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Floor the idle car was waiting at
    pub resting_floor: i32,
    /// When that resting state was recorded
    pub resting_time: DateTime<Utc>,
    /// Floor the call came from
    pub demand_floor: i32,
    /// When the call was made
    pub demand_time: DateTime<Utc>,
}

/// One entry of the merged resting/demand stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// When the event happened
    pub time: DateTime<Utc>,
    /// Resting floor or demanded floor
    pub floor: i32,
    /// `true` for a resting state, `false` for a demand
    pub event_type_is_resting: bool,
}

/// Builds the training dataset from the database.
#[instrument(skip(db))]
pub async fn training_dataset(db: &DatabaseConnection) -> Result<Vec<TrainingRecord>> {
    let resting = resting_states(db).await?;
    let demands = all_demands(db).await?;
    let records = pair_with_resting_states(&resting, &demands);
    debug!(
        demands = demands.len(),
        records = records.len(),
        "Built training dataset"
    );
    Ok(records)
}

/// Builds the merged resting/demand timeline from the database.
#[instrument(skip(db))]
pub async fn event_timeline(db: &DatabaseConnection) -> Result<Vec<TimelineEvent>> {
    let resting = resting_states(db).await?;
    let demands = all_demands(db).await?;
    let events = merge_timeline(&resting, &demands);
    debug!(events = events.len(), "Built event timeline");
    Ok(events)
}

async fn all_demands(db: &DatabaseConnection) -> Result<Vec<demand::Model>> {
    let mut demands = Demand::find().all(db).await?;
    demands.sort_by_key(|d| (d.demand_time, d.id));
    Ok(demands)
}

/// Pairs each demand with the latest resting state at or before it.
///
/// `resting` must be sorted by `(state_time, id)`. Among resting states with
/// the same timestamp the one inserted last wins. Demands that precede every
/// resting state produce no record.
pub(crate) fn pair_with_resting_states(
    resting: &[state::Model],
    demands: &[demand::Model],
) -> Vec<TrainingRecord> {
    demands
        .iter()
        .filter_map(|demand| {
            let idx = resting.partition_point(|s| s.state_time <= demand.demand_time);
            let rest = resting.get(idx.checked_sub(1)?)?;
            Some(TrainingRecord {
                resting_floor: rest.current_floor,
                resting_time: rest.state_time,
                demand_floor: demand.demand_floor,
                demand_time: demand.demand_time,
            })
        })
        .collect()
}

/// Merges resting states and demands into one stream ordered by time.
///
/// At equal timestamps resting events come before demands.
pub(crate) fn merge_timeline(
    resting: &[state::Model],
    demands: &[demand::Model],
) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = resting
        .iter()
        .map(|s| TimelineEvent {
            time: s.state_time,
            floor: s.current_floor,
            event_type_is_resting: true,
        })
        .chain(demands.iter().map(|d| TimelineEvent {
            time: d.demand_time,
            floor: d.demand_floor,
            event_type_is_resting: false,
        }))
        .collect();
    // Stable sort keeps resting events ahead of demands on ties.
    events.sort_by_key(|e| e.time);
    events
}
