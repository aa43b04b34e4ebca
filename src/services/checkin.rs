//! Check-in: validate tokens and mark attendance exactly once.
//!
//! The local transition is authoritative for admission control. A mirror
//! failure after it is logged and swallowed, never propagated and never rolled
//! back; this is the deliberate opposite of registration's policy.

use crate::error::Error;
use crate::mirror::MirrorClient;
use crate::models::{Attendee, EventId, RegistrationId};
use crate::store::{CheckInOutcome, Store};
use std::sync::Arc;

pub struct CheckInService {
    store: Arc<Store>,
    mirror: Arc<MirrorClient>,
}

impl CheckInService {
    pub fn new(store: Arc<Store>, mirror: Arc<MirrorClient>) -> Self {
        Self { store, mirror }
    }

    /// Mark the attendee holding `token` as present. At most one call per
    /// token ever succeeds; the guard and the write run atomically in the
    /// store.
    pub async fn check_in(&self, token: &RegistrationId) -> Result<Attendee, Error> {
        let attendee = match self.store.check_in(token).await? {
            CheckInOutcome::CheckedIn(attendee) => attendee,
            CheckInOutcome::AlreadyCheckedIn => return Err(Error::AlreadyCheckedIn),
            CheckInOutcome::UnknownToken => return Err(Error::InvalidToken),
        };
        tracing::info!("checked in attendee {} ({})", attendee.id, attendee.name);

        if self.mirror.is_configured() {
            if let Err(e) = self.mirror.notify_check_in(token).await {
                // Local check-in already committed and stays valid.
                tracing::warn!("mirror check-in update failed, local state kept: {}", e);
            }
        }

        Ok(attendee)
    }

    /// Door flow for a staffed event: reject tokens that belong to a different
    /// event before touching check-in state, then run the atomic transition.
    /// The scope guard mutates nothing and never counts against the
    /// idempotency guard.
    pub async fn check_in_for_event(
        &self,
        event_id: EventId,
        token: &RegistrationId,
    ) -> Result<Attendee, Error> {
        let attendee = self
            .store
            .find_by_registration_id(token)
            .await?
            .ok_or(Error::InvalidToken)?;
        if attendee.event_id != event_id {
            let event_name = self
                .store
                .get_event(attendee.event_id)
                .await?
                .map(|e| e.name)
                .unwrap_or_else(|| "Unknown".to_string());
            return Err(Error::WrongEvent { event_name });
        }
        self.check_in(token).await
    }
}
