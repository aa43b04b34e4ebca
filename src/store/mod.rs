//! SQLite storage: the `events` and `attendees` collections. This is the sole
//! source of truth for check-in state; the sheet mirror is downstream of it.
//!
//! The connection lives behind a tokio mutex owned by the `Store` instance, so
//! every logical operation (in particular the check-in read-guard-write in
//! `check_in`) runs as one critical section against the collections.

use crate::error::Error;
use crate::models::{Attendee, Event, EventId, RegistrationId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tokio::sync::Mutex;

pub struct Store {
    conn: Mutex<Connection>,
}

/// Tagged result of the atomic find-and-conditionally-replace on one token.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckInOutcome {
    CheckedIn(Attendee),
    AlreadyCheckedIn,
    UnknownToken,
}

impl Store {
    /// Open (or create) the database under `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = path.as_ref();
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join("checkin.db");
        tracing::info!("store::open db={:?}", db_path);
        let conn = Connection::open(db_path)?;
        create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub async fn insert_event(&self, event: &Event) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO events (id, name, date, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![event.id, event.name, event.date, event.description, event.created_at],
        )?;
        Ok(())
    }

    pub async fn get_event(&self, id: EventId) -> Result<Option<Event>, Error> {
        let conn = self.conn.lock().await;
        let event = conn
            .query_row(
                "SELECT id, name, date, description, created_at FROM events WHERE id = ?1",
                params![id],
                event_from_row,
            )
            .optional()?;
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, name, date, description, created_at FROM events ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map([], event_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn insert_attendee(&self, attendee: &Attendee) -> Result<(), Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO attendees (id, event_id, registration_id, name, email, checked_in, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                attendee.id,
                attendee.event_id,
                attendee.registration_id,
                attendee.name,
                attendee.email,
                attendee.checked_in,
                attendee.created_at
            ],
        )?;
        Ok(())
    }

    pub async fn list_attendees(&self, event_id: EventId) -> Result<Vec<Attendee>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, event_id, registration_id, name, email, checked_in, created_at
             FROM attendees WHERE event_id = ?1 ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(params![event_id], attendee_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn find_by_registration_id(
        &self,
        token: &RegistrationId,
    ) -> Result<Option<Attendee>, Error> {
        let conn = self.conn.lock().await;
        let attendee = conn
            .query_row(
                "SELECT id, event_id, registration_id, name, email, checked_in, created_at
                 FROM attendees WHERE registration_id = ?1",
                params![token],
                attendee_from_row,
            )
            .optional()?;
        Ok(attendee)
    }

    /// Atomically flip `checked_in` for the attendee holding `token`. Lookup,
    /// idempotency guard, and write share one lock acquisition, so interleaved
    /// check-ins of the same token see exactly one `CheckedIn`.
    pub async fn check_in(&self, token: &RegistrationId) -> Result<CheckInOutcome, Error> {
        let conn = self.conn.lock().await;
        let existing = conn
            .query_row(
                "SELECT id, event_id, registration_id, name, email, checked_in, created_at
                 FROM attendees WHERE registration_id = ?1",
                params![token],
                attendee_from_row,
            )
            .optional()?;
        let Some(attendee) = existing else {
            return Ok(CheckInOutcome::UnknownToken);
        };
        if attendee.checked_in {
            return Ok(CheckInOutcome::AlreadyCheckedIn);
        }
        let updated = conn.execute(
            "UPDATE attendees SET checked_in = 1 WHERE registration_id = ?1 AND checked_in = 0",
            params![token],
        )?;
        if updated == 0 {
            // Unreachable while the lock is held; the predicate keeps the
            // transition single-shot even so.
            return Ok(CheckInOutcome::AlreadyCheckedIn);
        }
        Ok(CheckInOutcome::CheckedIn(Attendee {
            checked_in: true,
            ..attendee
        }))
    }
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS attendees (
            id TEXT PRIMARY KEY,
            event_id TEXT NOT NULL REFERENCES events(id),
            registration_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            checked_in INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_attendees_event ON attendees(event_id);
        "#,
    )
}

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn attendee_from_row(row: &Row) -> rusqlite::Result<Attendee> {
    Ok(Attendee {
        id: row.get(0)?,
        event_id: row.get(1)?,
        registration_id: row.get(2)?,
        name: row.get(3)?,
        email: row.get(4)?,
        checked_in: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendeeId;
    use chrono::Utc;

    fn sample_event() -> Event {
        Event {
            id: EventId::generate(),
            name: "Rust Meetup".to_string(),
            date: "2026-09-12".parse().unwrap(),
            description: "Monthly meetup".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_attendee(event_id: EventId) -> Attendee {
        Attendee {
            id: AttendeeId::generate(),
            event_id,
            registration_id: RegistrationId::generate(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            checked_in: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_round_trip_event() {
        let store = Store::open_in_memory().unwrap();
        let event = sample_event();
        store.insert_event(&event).await.unwrap();
        let got = store.get_event(event.id).await.unwrap().unwrap();
        assert_eq!(got, event);
        assert!(store
            .get_event(EventId::generate())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn check_in_is_single_shot() {
        let store = Store::open_in_memory().unwrap();
        let event = sample_event();
        store.insert_event(&event).await.unwrap();
        let attendee = sample_attendee(event.id);
        store.insert_attendee(&attendee).await.unwrap();

        match store.check_in(&attendee.registration_id).await.unwrap() {
            CheckInOutcome::CheckedIn(a) => assert!(a.checked_in),
            other => panic!("expected CheckedIn, got {:?}", other),
        }
        assert_eq!(
            store.check_in(&attendee.registration_id).await.unwrap(),
            CheckInOutcome::AlreadyCheckedIn
        );
    }

    #[tokio::test]
    async fn check_in_unknown_token_leaves_store_unchanged() {
        let store = Store::open_in_memory().unwrap();
        let event = sample_event();
        store.insert_event(&event).await.unwrap();
        let attendee = sample_attendee(event.id);
        store.insert_attendee(&attendee).await.unwrap();

        assert_eq!(
            store.check_in(&RegistrationId::generate()).await.unwrap(),
            CheckInOutcome::UnknownToken
        );
        let got = store
            .find_by_registration_id(&attendee.registration_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!got.checked_in);
    }

    #[tokio::test]
    async fn duplicate_registration_id_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let event = sample_event();
        store.insert_event(&event).await.unwrap();
        let attendee = sample_attendee(event.id);
        store.insert_attendee(&attendee).await.unwrap();

        let mut clone = sample_attendee(event.id);
        clone.registration_id = attendee.registration_id;
        assert!(store.insert_attendee(&clone).await.is_err());
    }
}
