use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::Error;
use crate::models::{Attendee, EventId, RegistrationId};
use crate::AppState;

#[derive(Deserialize)]
pub struct CheckInRequest {
    /// Decoded token string from the scanning surface.
    pub registration_id: String,
}

/// POST /api/events/:id/check-in. Tokens for a different event are rejected
/// before the check-in transition runs; a decoded string that is not a token
/// at all maps to the same invalid-token error as an unknown one.
pub async fn check_in_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<Attendee>, Error> {
    let event_id = EventId::parse(&id).map_err(Error::Validation)?;
    let token = RegistrationId::parse(&payload.registration_id).map_err(|_| Error::InvalidToken)?;
    let attendee = state.checkin.check_in_for_event(event_id, &token).await?;
    Ok(Json(attendee))
}
