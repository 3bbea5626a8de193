//! HTTP interface - axum router over the core operations.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET/POST /state` | list / record states |
//! | `GET /state/latest` | most recent state |
//! | `GET/POST /demand` | list / record demands |
//! | `GET /dataset` | training records |
//! | `GET /dataset/events` | merged resting/demand timeline |
//! | `GET /health` | database ping |

/// Error to response mapping
pub mod error;
mod routes;
/// Request and response bodies
pub mod types;

use axum::Router;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::errors::Result;

/// Shared data available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    /// Wraps a database connection for the router.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(routes::list_states).post(routes::create_state))
        .route("/state/latest", get(routes::latest_state))
        .route("/demand", get(routes::list_demands).post(routes::create_demand))
        .route("/dataset", get(routes::dataset))
        .route("/dataset/events", get(routes::dataset_events))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on the configured address until Ctrl-C or SIGTERM.
#[instrument(skip_all, fields(bind_addr = %config.server.bind_addr))]
pub async fn serve(config: &AppConfig, db: DatabaseConnection) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        router(AppState::new(setup_test_db().await.unwrap()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read_state() {
        let app = test_app().await;
        let payload = json!({
            "current_floor": 1,
            "state_time": Utc::now().naive_utc().to_string(),
            "vacant": true,
            "mooving": false,
        });

        let (status, created) = send(&app, post_json("/state", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["current_floor"], 1);
        assert_eq!(created["vacant"], true);
        assert_eq!(created["mooving"], false);
        assert!(created["id"].as_i64().is_some());

        let (status, states) = send(&app, get_request("/state")).await;
        assert_eq!(status, StatusCode::OK);
        let states = states.as_array().unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_create_state_without_time_uses_now() {
        let app = test_app().await;
        let before = Utc::now();
        let payload = json!({"current_floor": 2, "vacant": false, "mooving": true});

        let (status, created) = send(&app, post_json("/state", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        let recorded =
            crate::api::types::parse_timestamp(created["state_time"].as_str().unwrap()).unwrap();
        assert!(recorded >= before && recorded <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_state_missing_field_is_unprocessable() {
        let app = test_app().await;
        let payload = json!({"vacant": true, "mooving": false});

        let (status, _) = send(&app, post_json("/state", &payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, states) = send(&app, get_request("/state")).await;
        assert!(states.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_read_demand() {
        let app = test_app().await;
        let payload = json!({
            "demand_floor": 3,
            "demand_time": Utc::now().to_rfc3339(),
        });

        let (status, created) = send(&app, post_json("/demand", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["demand_floor"], 3);

        let (status, demands) = send(&app, get_request("/demand")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(demands.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_with_reversed_range_is_bad_request() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            get_request("/demand?from=2024-01-02T00:00:00&until=2024-01-01T00:00:00"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Invalid time range")
        );
    }

    #[tokio::test]
    async fn test_list_states_with_range() {
        let db = setup_test_db().await.unwrap();
        let now = Utc::now();
        create_state_at(&db, 0, true, false, now - Duration::hours(3))
            .await
            .unwrap();
        create_state_at(&db, 1, true, false, now - Duration::hours(1))
            .await
            .unwrap();
        let app = router(AppState::new(db));

        let from = (now - Duration::hours(2)).naive_utc().format("%Y-%m-%dT%H:%M:%S");
        let (status, states) = send(&app, get_request(&format!("/state?from={from}"))).await;
        assert_eq!(status, StatusCode::OK);
        let states = states.as_array().unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0]["current_floor"], 1);
    }

    #[tokio::test]
    async fn test_latest_state() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/state/latest")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        let payload = json!({"current_floor": 6, "vacant": true, "mooving": false});
        send(&app, post_json("/state", &payload)).await;

        let (status, latest) = send(&app, get_request("/state/latest")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest["current_floor"], 6);
    }

    #[tokio::test]
    async fn test_get_dataset() {
        let app = test_app().await;
        let resting = json!({
            "current_floor": 2,
            "state_time": (Utc::now() - Duration::minutes(10)).naive_utc().to_string(),
            "vacant": true,
            "mooving": false,
        });
        let (status, _) = send(&app, post_json("/state", &resting)).await;
        assert_eq!(status, StatusCode::CREATED);

        let demand = json!({
            "demand_floor": 4,
            "demand_time": Utc::now().naive_utc().to_string(),
        });
        let (status, _) = send(&app, post_json("/demand", &demand)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, dataset) = send(&app, get_request("/dataset")).await;
        assert_eq!(status, StatusCode::OK);
        let records = dataset.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["resting_floor"], 2);
        assert_eq!(records[0]["demand_floor"], 4);
    }

    #[tokio::test]
    async fn test_get_dataset_events() {
        let app = test_app().await;
        let resting = json!({
            "current_floor": 2,
            "state_time": (Utc::now() - Duration::minutes(10)).to_rfc3339(),
            "vacant": true,
            "mooving": false,
        });
        send(&app, post_json("/state", &resting)).await;
        send(&app, post_json("/demand", &json!({"demand_floor": 4}))).await;

        let (status, events) = send(&app, get_request("/dataset/events")).await;
        assert_eq!(status, StatusCode::OK);
        let events = events.as_array().unwrap();

        let times: Vec<_> = events
            .iter()
            .map(|e| crate::api::types::parse_timestamp(e["time"].as_str().unwrap()).unwrap())
            .collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);

        assert!(events.iter().any(|e| e["event_type_is_resting"] == true));
        assert!(events.iter().any(|e| e["event_type_is_resting"] == false));
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["database"], "ok");
    }
}
