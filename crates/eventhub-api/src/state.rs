//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use eventhub_core::config::AppConfig;
use eventhub_database::StoreHandles;
use eventhub_service::{EventService, RegistrationService, RetryPolicy};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration and cancellation
    pub registration_service: Arc<RegistrationService>,
    /// Event catalogue
    pub event_service: Arc<EventService>,
}

impl AppState {
    /// Wire the services over one set of store handles.
    pub fn new(config: AppConfig, stores: StoreHandles) -> Self {
        let retry = RetryPolicy::from_config(&config.registration);
        Self {
            registration_service: Arc::new(RegistrationService::new(
                Arc::clone(&stores.registrations),
                Arc::clone(&stores.ledger),
                retry,
            )),
            event_service: Arc::new(EventService::new(Arc::clone(&stores.events))),
            config: Arc::new(config),
        }
    }
}
