//! Error taxonomy for the registration/check-in core, plus the HTTP mapping.
//!
//! Policy: local-store and validation errors always propagate. Mirror errors
//! propagate only out of registration; check-in swallows them (see
//! services::checkin).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::mirror::MirrorError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("event not found")]
    EventNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("registration id not valid")]
    InvalidToken,

    #[error("already checked in")]
    AlreadyCheckedIn,

    /// Token belongs to an attendee of a different event than the one being
    /// staffed. Raised by the caller-side scope guard, never by the check-in
    /// transition itself.
    #[error("attendee is registered for a different event ({event_name})")]
    WrongEvent { event_name: String },

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::EventNotFound | Error::InvalidToken => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::AlreadyCheckedIn | Error::WrongEvent { .. } => StatusCode::CONFLICT,
            Error::Mirror(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(e) => {
                tracing::error!("storage error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
