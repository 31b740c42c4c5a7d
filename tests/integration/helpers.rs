//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use eventhub_api::{AppState, build_router};
use eventhub_core::config::{AppConfig, StoreBackend};
use eventhub_core::types::{EventId, UserId};
use eventhub_database::{DatabasePool, MemoryStore, StoreHandles};
use eventhub_entity::{Event, NewEvent};

/// Environment variable naming the database used by the PostgreSQL tests.
pub const TEST_DATABASE_URL: &str = "EVENTHUB_TEST_DATABASE_URL";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
    /// Open pool when running against PostgreSQL
    pub db: Option<DatabasePool>,
}

/// A decoded test response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body (`Null` when empty)
    pub body: Value,
}

impl TestApp {
    /// Create a test application over a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.registration.retry_initial_delay_ms = 1;
        Self::build(config, StoreHandles::memory(MemoryStore::new()), None)
    }

    /// Create a test application over PostgreSQL, or `None` when no test
    /// database is configured
    pub async fn postgres() -> Option<Self> {
        let url = std::env::var(TEST_DATABASE_URL).ok()?;

        let mut config = AppConfig::default();
        config.database.url = url;
        config.database.max_connections = 32;
        config.registration.max_retries = 10;
        config.registration.retry_initial_delay_ms = 1;

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        eventhub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let stores = StoreHandles::postgres(&db);
        Some(Self::build(config, stores, Some(db)))
    }

    fn build(config: AppConfig, stores: StoreHandles, db: Option<DatabasePool>) -> Self {
        let state = AppState::new(config, stores);
        Self {
            router: build_router(state.clone()),
            state,
            db,
        }
    }

    /// Create an event with the given capacity
    pub async fn create_event(&self, capacity: i32) -> Event {
        self.state
            .event_service
            .create(NewEvent {
                name: format!("Test Event {}", EventId::new()),
                organizer: "Test Organizer".to_string(),
                location: "Test Venue".to_string(),
                starts_at: Utc::now(),
                description: "Integration test event".to_string(),
                capacity,
                category: "Testing".to_string(),
                tags: vec!["test".to_string()],
            })
            .await
            .expect("Failed to create event")
    }

    /// Current available seats of an event
    pub async fn available_seats(&self, event_id: EventId) -> u32 {
        self.state
            .registration_service
            .seats(event_id)
            .await
            .expect("Failed to read seats")
            .available
    }

    /// POST /api/events/{id}/register as `user`
    pub async fn register(&self, event_id: EventId, user: UserId) -> TestResponse {
        self.request("POST", &format!("/api/events/{event_id}/register"), Some(user))
            .await
    }

    /// DELETE /api/events/{id}/cancel as `user`
    pub async fn cancel(&self, event_id: EventId, user: UserId) -> TestResponse {
        self.request("DELETE", &format!("/api/events/{event_id}/cancel"), Some(user))
            .await
    }

    /// GET /api/events/user/me as `user`
    pub async fn my_registrations(&self, user: UserId) -> TestResponse {
        self.request("GET", "/api/events/user/me", Some(user)).await
    }

    /// Make a request, optionally carrying a verified identity
    pub async fn request(&self, method: &str, path: &str, user: Option<UserId>) -> TestResponse {
        let identity = user.map(|u| u.to_string());
        self.request_as(method, path, identity.as_deref()).await
    }

    /// Make a request with a raw identity header value
    pub async fn request_as(
        &self,
        method: &str,
        path: &str,
        identity: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(identity) = identity {
            let header = self.state.config.auth.identity_header.as_str();
            req = req.header(header, identity);
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
