//! Registration: create attendee records, issue tokens, mirror the result.

use crate::error::Error;
use crate::mirror::MirrorClient;
use crate::models::{Attendee, AttendeeId, EventId, RegistrationId};
use crate::store::Store;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize)]
pub struct NewAttendee {
    pub name: String,
    pub email: String,
}

pub struct RegistrationService {
    store: Arc<Store>,
    mirror: Arc<MirrorClient>,
}

impl RegistrationService {
    pub fn new(store: Arc<Store>, mirror: Arc<MirrorClient>) -> Self {
        Self { store, mirror }
    }

    /// Register an attendee for an event. The local insert is the point of
    /// commitment; the mirror call after it is awaited, and a mirror failure
    /// propagates so the registrant knows their credential may not be
    /// reflected externally yet. The stored record is kept either way.
    pub async fn register(&self, event_id: EventId, new: NewAttendee) -> Result<Attendee, Error> {
        let name = new.name.trim();
        let email = new.email.trim();
        if name.is_empty() {
            return Err(Error::Validation("name is required".to_string()));
        }
        if email.is_empty() {
            return Err(Error::Validation("email is required".to_string()));
        }

        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or(Error::EventNotFound)?;

        let attendee = Attendee {
            id: AttendeeId::generate(),
            event_id,
            registration_id: RegistrationId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            checked_in: false,
            created_at: chrono::Utc::now(),
        };
        self.store.insert_attendee(&attendee).await?;
        tracing::info!(
            "registered attendee {} for event {} ({})",
            attendee.id,
            event.id,
            event.name
        );

        if self.mirror.is_configured() {
            self.mirror.notify_registration(&event, &attendee).await?;
        } else {
            tracing::warn!("mirror webhook not configured, registration stored locally only");
        }

        Ok(attendee)
    }
}
