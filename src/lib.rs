// Library root - exports for the binary and tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod mirror;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::Error;

use axum::routing::{get, post};
use axum::Router;
use mirror::MirrorClient;
use services::{CheckInService, RegistrationService};
use std::sync::Arc;
use std::time::Duration;
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
    pub registration: Arc<RegistrationService>,
    pub checkin: Arc<CheckInService>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(store);
        let config = Arc::new(config);
        let mirror = Arc::new(MirrorClient::new(
            config.mirror_url.clone(),
            Duration::from_secs(config.mirror_timeout_secs),
        )?);
        Ok(Self {
            registration: Arc::new(RegistrationService::new(store.clone(), mirror.clone())),
            checkin: Arc::new(CheckInService::new(store.clone(), mirror)),
            store,
            config,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(handlers::get_events))
        .route("/api/events", post(handlers::create_event))
        .route("/api/events/describe", post(handlers::describe_event))
        .route("/api/events/:id", get(handlers::get_event))
        .route("/api/events/:id/register", post(handlers::register_attendee))
        .route("/api/events/:id/check-in", post(handlers::check_in_attendee))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
