use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::error::Error;
use crate::models::{Attendee, EventId};
use crate::services::NewAttendee;
use crate::AppState;

/// POST /api/events/:id/register. The response carries `registration_id`, the
/// credential the attendee's QR code encodes (rendering is the client's job).
pub async fn register_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewAttendee>,
) -> Result<(StatusCode, Json<Attendee>), Error> {
    let event_id = EventId::parse(&id).map_err(Error::Validation)?;
    let attendee = state.registration.register(event_id, payload).await?;
    Ok((StatusCode::CREATED, Json(attendee)))
}
