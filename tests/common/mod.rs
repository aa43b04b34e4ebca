//! Shared helpers for integration tests: a store-backed service pair and a
//! local listener standing in for the sheet webhook.
#![allow(dead_code)] // each test binary uses its own subset of these helpers

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use event_checkin_api::mirror::MirrorClient;
use event_checkin_api::models::{Event, EventId};
use event_checkin_api::services::{CheckInService, RegistrationService};
use event_checkin_api::store::Store;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub struct TestApp {
    pub store: Arc<Store>,
    pub registration: RegistrationService,
    pub checkin: CheckInService,
    // Keeps the store directory alive for the test's duration.
    _tmp: Option<TempDir>,
}

pub fn test_app(mirror_url: Option<String>) -> TestApp {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(Store::open(tmp.path()).expect("open store"));
    let mut app = test_app_with_store(store, mirror_url);
    app._tmp = Some(tmp);
    app
}

/// Services over an existing store, e.g. a second "door station" pointed at a
/// different mirror.
pub fn test_app_with_store(store: Arc<Store>, mirror_url: Option<String>) -> TestApp {
    let mirror = Arc::new(
        MirrorClient::new(mirror_url, Duration::from_secs(2)).expect("mirror client"),
    );
    TestApp {
        registration: RegistrationService::new(store.clone(), mirror.clone()),
        checkin: CheckInService::new(store.clone(), mirror),
        store,
        _tmp: None,
    }
}

pub async fn seed_event(store: &Store, name: &str) -> Event {
    let event = Event {
        id: EventId::generate(),
        name: name.to_string(),
        date: "2026-09-12".parse().unwrap(),
        description: "test event".to_string(),
        created_at: Utc::now(),
    };
    store.insert_event(&event).await.expect("insert event");
    event
}

/// How the fake webhook answers. Switchable mid-test via `set_mode`.
#[derive(Clone, Copy, PartialEq)]
pub enum MirrorMode {
    Accept,
    Reject500,
}

pub struct FakeMirror {
    pub url: String,
    pub requests: Arc<Mutex<Vec<serde_json::Value>>>,
    mode: Arc<Mutex<MirrorMode>>,
}

impl FakeMirror {
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_mode(&self, mode: MirrorMode) {
        *self.mode.lock().unwrap() = mode;
    }
}

/// Spawn an in-process webhook endpoint on an ephemeral port, recording every
/// payload it receives.
pub async fn spawn_mirror(mode: MirrorMode) -> FakeMirror {
    let requests: Arc<Mutex<Vec<serde_json::Value>>> = Arc::new(Mutex::new(Vec::new()));
    let mode = Arc::new(Mutex::new(mode));
    let recorded = requests.clone();
    let answer = mode.clone();
    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<serde_json::Value>| {
            let recorded = recorded.clone();
            let answer = answer.clone();
            async move {
                recorded.lock().unwrap().push(body);
                match *answer.lock().unwrap() {
                    MirrorMode::Accept => (
                        StatusCode::OK,
                        Json(serde_json::json!({ "message": "saved" })),
                    ),
                    MirrorMode::Reject500 => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({ "message": "sheet quota exceeded" })),
                    ),
                }
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake mirror");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake mirror");
    });
    FakeMirror {
        url: format!("http://{}", addr),
        requests,
        mode,
    }
}

/// A port nothing listens on, for unreachable-mirror tests.
pub async fn dead_mirror_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
