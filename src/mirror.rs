//! HTTP client for the spreadsheet-style mirror webhook. Best-effort by
//! contract: the local store stays authoritative no matter what happens here.
//! Whether a failure propagates is decided by the calling service, not by this
//! client (registration surfaces it, check-in swallows it).

use crate::models::{Attendee, Event, RegistrationId};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("mirror request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. Carries the server's `message` field when the body
    /// parses, otherwise a generic message.
    #[error("mirror rejected request: {0}")]
    Rejected(String),
}

pub struct MirrorClient {
    client: reqwest::Client,
    url: Option<String>,
}

impl MirrorClient {
    pub fn new(url: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// False when no webhook URL is configured; callers then run local-only.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    pub async fn notify_registration(
        &self,
        event: &Event,
        attendee: &Attendee,
    ) -> Result<(), MirrorError> {
        let payload = serde_json::json!({
            "action": "register",
            "eventId": event.id,
            "eventName": event.name,
            "name": attendee.name,
            "email": attendee.email,
            "registrationId": attendee.registration_id,
        });
        self.post(payload).await
    }

    pub async fn notify_check_in(&self, registration_id: &RegistrationId) -> Result<(), MirrorError> {
        let payload = serde_json::json!({
            "action": "checkin",
            "registrationId": registration_id,
        });
        self.post(payload).await
    }

    async fn post(&self, payload: serde_json::Value) -> Result<(), MirrorError> {
        let Some(url) = &self.url else {
            return Ok(());
        };
        let resp = self.client.post(url).json(&payload).send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let body: Option<serde_json::Value> = serde_json::from_str(&text).ok();
        let message = body
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str());
        if !status.is_success() {
            return Err(MirrorError::Rejected(format!(
                "{} - {}",
                status,
                message.unwrap_or("Unknown server error")
            )));
        }
        if let Some(msg) = message {
            tracing::debug!("mirror accepted: {}", msg);
        }
        Ok(())
    }
}
