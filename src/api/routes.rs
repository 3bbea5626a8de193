//! Endpoint handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{CreateDemandRequest, CreateStateRequest, HealthResponse, TimeRangeQuery};
use crate::core::{self as elevator, TimelineEvent, TrainingRecord};
use crate::entities::{DemandModel, StateModel};
use crate::errors::{Error, Result};

/// GET /state
///
/// All recorded states, oldest first. Accepts `from` / `until`.
pub(super) async fn list_states(
    State(app): State<AppState>,
    Query(query): Query<TimeRangeQuery>,
) -> Result<Json<Vec<StateModel>>> {
    let range = query.into_range()?;
    let states = elevator::list_states(&app.db, range).await?;
    Ok(Json(states))
}

/// POST /state
///
/// Logs a new state of the car. Returns 201 with the stored row.
pub(super) async fn create_state(
    State(app): State<AppState>,
    Json(body): Json<CreateStateRequest>,
) -> Result<(StatusCode, Json<StateModel>)> {
    let stored = elevator::record_state(&app.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /state/latest
///
/// The most recent state, or 404 when nothing was recorded yet.
pub(super) async fn latest_state(State(app): State<AppState>) -> Result<Json<StateModel>> {
    elevator::latest_state(&app.db)
        .await?
        .map(Json)
        .ok_or(Error::NoStateRecorded)
}

/// GET /demand
///
/// All recorded demands, oldest first. Accepts `from` / `until`.
pub(super) async fn list_demands(
    State(app): State<AppState>,
    Query(query): Query<TimeRangeQuery>,
) -> Result<Json<Vec<DemandModel>>> {
    let range = query.into_range()?;
    let demands = elevator::list_demands(&app.db, range).await?;
    Ok(Json(demands))
}

/// POST /demand
///
/// Logs a new floor call. Returns 201 with the stored row.
pub(super) async fn create_demand(
    State(app): State<AppState>,
    Json(body): Json<CreateDemandRequest>,
) -> Result<(StatusCode, Json<DemandModel>)> {
    let stored = elevator::record_demand(&app.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /dataset
///
/// Demands paired with the resting state that preceded them.
pub(super) async fn dataset(State(app): State<AppState>) -> Result<Json<Vec<TrainingRecord>>> {
    Ok(Json(elevator::training_dataset(&app.db).await?))
}

/// GET /dataset/events
///
/// Resting states and demands merged into one chronological stream.
pub(super) async fn dataset_events(
    State(app): State<AppState>,
) -> Result<Json<Vec<TimelineEvent>>> {
    Ok(Json(elevator::event_timeline(&app.db).await?))
}

/// GET /health
pub(super) async fn health(State(app): State<AppState>) -> Json<HealthResponse> {
    let (healthy, database) = match app.db.ping().await {
        Ok(()) => (true, "ok".to_string()),
        Err(e) => (false, e.to_string()),
    };
    Json(HealthResponse { healthy, database })
}
