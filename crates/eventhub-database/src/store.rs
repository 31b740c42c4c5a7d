//! Store traits issued against the durable store, and the bundle of
//! handles the services are constructed from.

use std::sync::Arc;

use async_trait::async_trait;

use eventhub_core::error::{CancelError, RegisterError};
use eventhub_core::result::AppResult;
use eventhub_core::traits::CapacityLedger;
use eventhub_core::types::{EventId, UserId};
use eventhub_entity::{Event, Registration, RegistrationDetail};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{EventRepository, RegistrationRepository};

/// Event rows as seen by the authoring flow.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Persist a new event. Its seat count must already be in range.
    async fn create_event(&self, event: &Event) -> AppResult<Event>;

    /// Find an event by id.
    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>>;

    /// Find an event by exact name.
    async fn find_event_by_name(&self, name: &str) -> AppResult<Option<Event>>;

    /// Remove every event together with its registrations.
    async fn clear(&self) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Registration records kept in lockstep with the seat ledger.
///
/// Each mutating call is all-or-nothing: the record change and the seat
/// change commit together or not at all.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug {
    /// Take a seat and record the registration.
    async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Registration, RegisterError>;

    /// Remove the registration and give its seat back.
    async fn cancel(&self, user_id: UserId, event_id: EventId)
    -> Result<Registration, CancelError>;

    /// The live registration for the pair, if any.
    async fn find(&self, user_id: UserId, event_id: EventId) -> AppResult<Option<Registration>>;

    /// Every registration of a user with its event, newest first.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<RegistrationDetail>>;
}

/// The three store handles the services depend on, all backed by one store.
#[derive(Debug, Clone)]
pub struct StoreHandles {
    /// Event rows.
    pub events: Arc<dyn EventStore>,
    /// Seat ledger.
    pub ledger: Arc<dyn CapacityLedger>,
    /// Registration records.
    pub registrations: Arc<dyn RegistrationStore>,
}

impl StoreHandles {
    /// Handles backed by PostgreSQL.
    pub fn postgres(db: &DatabasePool) -> Self {
        let events = Arc::new(EventRepository::new(db.pool().clone()));
        Self {
            events: events.clone(),
            ledger: events,
            registrations: Arc::new(RegistrationRepository::new(db.pool().clone())),
        }
    }

    /// Handles backed by a single shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            events: store.clone(),
            ledger: store.clone(),
            registrations: store,
        }
    }
}
