//! Error types for the Cookoff API surface.
//!
//! Validation failures map to HTTP 400 with a structured `{ok, error}` body;
//! everything else is a generic 500. All validation happens before any
//! storage mutation, so a failed request never leaves a partial row behind.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use cookoff_core::DatabaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or non-numeric request fields.
    #[error("Invalid payload")]
    InvalidPayload,

    /// Entrant index outside the roster.
    #[error("Invalid entrant")]
    InvalidEntrant,

    /// Score outside the 1..=5 range.
    #[error("Scores must be 1-5")]
    InvalidScore,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidPayload | Self::InvalidEntrant | Self::InvalidScore => {
                StatusCode::BAD_REQUEST
            }
            Self::Database(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (
            status,
            Json(ErrorBody {
                ok: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
