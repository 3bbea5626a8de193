//! Maps crate errors onto HTTP responses.
//!
//! Caller mistakes get their message back; internal failures are logged and
//! answered with a generic 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::types::ErrorResponse;
use crate::errors::Error;

impl Error {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTimeRange { .. } => StatusCode::BAD_REQUEST,
            Self::NoStateRecorded => StatusCode::NOT_FOUND,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("{}", self);
            "Internal server error".to_string()
        } else {
            warn!("{}", self);
            self.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
