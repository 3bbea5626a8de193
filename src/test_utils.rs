//! Shared test utilities.
//!
//! Helpers for an in-memory database and for recording states and demands
//! with sensible defaults.

use crate::{
    core::{NewDemand, NewState, demand, state},
    entities,
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Records a resting state (vacant, not moving) at `floor`, timestamped now.
pub async fn create_test_state(
    db: &DatabaseConnection,
    floor: i32,
) -> Result<entities::state::Model> {
    state::record_state(
        db,
        NewState {
            current_floor: floor,
            vacant: true,
            moving: false,
            state_time: None,
        },
    )
    .await
}

/// Records a state with every field chosen by the caller.
pub async fn create_state_at(
    db: &DatabaseConnection,
    floor: i32,
    vacant: bool,
    moving: bool,
    at: DateTime<Utc>,
) -> Result<entities::state::Model> {
    state::record_state(
        db,
        NewState {
            current_floor: floor,
            vacant,
            moving,
            state_time: Some(at),
        },
    )
    .await
}

/// Records a demand from `floor`, timestamped now.
pub async fn create_test_demand(
    db: &DatabaseConnection,
    floor: i32,
) -> Result<entities::demand::Model> {
    demand::record_demand(
        db,
        NewDemand {
            demand_floor: floor,
            demand_time: None,
        },
    )
    .await
}

/// Records a demand from `floor` at `at`.
pub async fn create_demand_at(
    db: &DatabaseConnection,
    floor: i32,
    at: DateTime<Utc>,
) -> Result<entities::demand::Model> {
    demand::record_demand(
        db,
        NewDemand {
            demand_floor: floor,
            demand_time: Some(at),
        },
    )
    .await
}

/// Inserts a resting state at `floor` directly, leaving `state_time` to the
/// column default.
pub async fn create_defaulted_state(
    db: &DatabaseConnection,
    floor: i32,
) -> Result<entities::state::Model> {
    let stored = entities::state::ActiveModel {
        current_floor: Set(floor),
        vacant: Set(true),
        moving: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(stored)
}
