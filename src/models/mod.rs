//! Data models for events and attendees. Wire format is JSON with snake_case
//! keys; IDs are typed (ids.rs) and dates use chrono types.

pub mod ids;

pub use ids::{AttendeeId, EventId, RegistrationId};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled gathering attendees register for. Immutable after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One person's registration record for one event. `registration_id` is the
/// check-in credential; `checked_in` only ever moves false -> true.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: AttendeeId,
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub name: String,
    pub email: String,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}
