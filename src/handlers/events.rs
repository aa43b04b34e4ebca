use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{Attendee, Event, EventId};
use crate::services::describe;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize)]
pub struct EventDetailsResponse {
    #[serde(flatten)]
    pub event: Event,
    pub attendees: Vec<Attendee>,
    pub checked_in_count: usize,
}

#[derive(Deserialize)]
pub struct DescribeRequest {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Serialize)]
pub struct DescribeResponse {
    pub description: String,
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), Error> {
    if payload.name.trim().is_empty() {
        return Err(Error::Validation("name is required".to_string()));
    }
    let event = Event {
        id: EventId::generate(),
        name: payload.name.trim().to_string(),
        date: payload.date,
        description: payload.description,
        created_at: chrono::Utc::now(),
    };
    state.store.insert_event(&event).await?;
    tracing::info!("created event {} ({})", event.id, event.name);
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, Error> {
    Ok(Json(state.store.list_events().await?))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventDetailsResponse>, Error> {
    let id = EventId::parse(&id).map_err(Error::Validation)?;
    let event = state.store.get_event(id).await?.ok_or(Error::EventNotFound)?;
    let attendees = state.store.list_attendees(id).await?;
    let checked_in_count = attendees.iter().filter(|a| a.checked_in).count();
    Ok(Json(EventDetailsResponse {
        event,
        attendees,
        checked_in_count,
    }))
}

/// Draft a description for the creation form. Always returns text; when the
/// assistant is disabled or failing the body carries its fallback message.
pub async fn describe_event(
    State(state): State<AppState>,
    Json(payload): Json<DescribeRequest>,
) -> Result<Json<DescribeResponse>, Error> {
    if payload.name.trim().is_empty() {
        return Err(Error::Validation("name is required".to_string()));
    }
    let description = describe::generate_description(
        state.config.gemini_api_key.as_deref(),
        payload.name.trim(),
        payload.date,
    )
    .await;
    Ok(Json(DescribeResponse { description }))
}
