//! Demand business logic - recording and reading floor calls.

use crate::{
    core::time_range::TimeRange,
    entities::{Demand, demand},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, instrument};

/// A floor call to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDemand {
    /// Floor the call was made from
    pub demand_floor: i32,
    /// Call time; `None` records the current time
    pub demand_time: Option<DateTime<Utc>>,
}

/// Records a floor call and returns the stored row.
#[instrument(skip(db))]
pub async fn record_demand(
    db: &DatabaseConnection,
    new_demand: NewDemand,
) -> Result<demand::Model> {
    let model = demand::ActiveModel {
        demand_floor: Set(new_demand.demand_floor),
        demand_time: Set(new_demand.demand_time.unwrap_or_else(Utc::now)),
        ..Default::default()
    };

    let stored = model.insert(db).await?;
    info!(
        demand_id = stored.id,
        floor = stored.demand_floor,
        "Recorded elevator demand"
    );
    Ok(stored)
}

/// Lists demands inside `range`, oldest first.
#[instrument(skip(db))]
pub async fn list_demands(db: &DatabaseConnection, range: TimeRange) -> Result<Vec<demand::Model>> {
    range.validate()?;
    let demands = range.apply(Demand::find().all(db).await?, |d| (d.demand_time, d.id));
    debug!(count = demands.len(), "Fetched elevator demands");
    Ok(demands)
}
