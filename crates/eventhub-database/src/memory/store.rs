//! In-memory store using a Tokio mutex per event for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use eventhub_core::error::{AppError, CancelError, CapacityError, RegisterError};
use eventhub_core::result::AppResult;
use eventhub_core::traits::CapacityLedger;
use eventhub_core::types::{EventId, SeatCount, UserId};
use eventhub_entity::{Event, Registration, RegistrationDetail};

use crate::store::{EventStore, RegistrationStore};

/// One event's row and its live registrations, guarded together.
#[derive(Debug)]
struct EventSlot {
    /// The event, including its seat counts.
    event: Event,
    /// Live registrations keyed by holder.
    registrations: HashMap<UserId, Registration>,
}

impl EventSlot {
    fn reserve(&mut self) -> Result<SeatCount, CapacityError> {
        if self.event.available_seats <= 0 {
            return Err(CapacityError::SoldOut(self.event.id));
        }
        self.event.available_seats -= 1;
        self.event.updated_at = Utc::now();
        Ok(self.event.seat_count())
    }

    fn release(&mut self) -> Result<SeatCount, CapacityError> {
        if self.event.available_seats >= self.event.capacity {
            warn!(
                event_id = %self.event.id,
                capacity = self.event.capacity,
                available_seats = self.event.available_seats,
                "Seat release without a matching reservation"
            );
            return Err(CapacityError::Inconsistent {
                event_id: self.event.id,
                capacity: u32::try_from(self.event.capacity).unwrap_or(0),
            });
        }
        self.event.available_seats += 1;
        self.event.updated_at = Utc::now();
        Ok(self.event.seat_count())
    }
}

/// In-memory implementation of every store trait.
///
/// Each event lives behind its own mutex, so a registration and its seat
/// change are applied under one lock and operations on different events
/// never contend. Clones share the same state. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Arc<DashMap<EventId, Arc<Mutex<EventSlot>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot for an event. The map guard is dropped before the caller awaits the lock.
    fn slot(&self, event_id: EventId) -> Option<Arc<Mutex<EventSlot>>> {
        self.events.get(&event_id).map(|entry| entry.value().clone())
    }

    fn all_slots(&self) -> Vec<Arc<Mutex<EventSlot>>> {
        self.events.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl CapacityLedger for MemoryStore {
    async fn try_reserve(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let slot = self.slot(event_id).ok_or(CapacityError::NotFound(event_id))?;
        let seats = slot.lock().await.reserve()?;
        debug!(event_id = %event_id, available_seats = seats.available, "Seat reserved");
        Ok(seats)
    }

    async fn release(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let slot = self.slot(event_id).ok_or(CapacityError::NotFound(event_id))?;
        let seats = slot.lock().await.release()?;
        debug!(event_id = %event_id, available_seats = seats.available, "Seat released");
        Ok(seats)
    }

    async fn seats(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let slot = self.slot(event_id).ok_or(CapacityError::NotFound(event_id))?;
        let seats = slot.lock().await.event.seat_count();
        Ok(seats)
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Registration, RegisterError> {
        let slot = self
            .slot(event_id)
            .ok_or(RegisterError::EventNotFound(event_id))?;
        let mut slot = slot.lock().await;

        if slot.registrations.contains_key(&user_id) {
            return Err(RegisterError::AlreadyRegistered { user_id, event_id });
        }

        let seats = slot.reserve()?;
        let registration = Registration::new(user_id, event_id);
        slot.registrations.insert(user_id, registration.clone());

        debug!(
            user_id = %user_id,
            event_id = %event_id,
            available_seats = seats.available,
            "Registration committed"
        );
        Ok(registration)
    }

    async fn cancel(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Registration, CancelError> {
        let not_registered = CancelError::NotRegistered { user_id, event_id };
        let Some(slot) = self.slot(event_id) else {
            return Err(not_registered);
        };
        let mut slot = slot.lock().await;

        let removed = slot.registrations.remove(&user_id).ok_or(not_registered)?;

        match slot.release() {
            Ok(seats) => {
                debug!(
                    user_id = %user_id,
                    event_id = %event_id,
                    available_seats = seats.available,
                    "Cancellation committed"
                );
                Ok(removed)
            }
            Err(e) => {
                // Roll back: the record stays live when its seat cannot be returned.
                slot.registrations.insert(user_id, removed);
                Err(e.into())
            }
        }
    }

    async fn find(&self, user_id: UserId, event_id: EventId) -> AppResult<Option<Registration>> {
        let Some(slot) = self.slot(event_id) else {
            return Ok(None);
        };
        let slot = slot.lock().await;
        Ok(slot.registrations.get(&user_id).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<RegistrationDetail>> {
        let mut details = Vec::new();
        for slot in self.all_slots() {
            let slot = slot.lock().await;
            if let Some(registration) = slot.registrations.get(&user_id) {
                details.push(RegistrationDetail {
                    registration: registration.clone(),
                    event: slot.event.clone(),
                });
            }
        }

        details.sort_by(|a, b| {
            b.registration
                .created_at
                .cmp(&a.registration.created_at)
                .then_with(|| b.registration.id.cmp(&a.registration.id))
        });
        Ok(details)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(&self, event: &Event) -> AppResult<Event> {
        if event.capacity <= 0 {
            return Err(AppError::validation("capacity must be positive"));
        }
        if event.available_seats < 0 || event.available_seats > event.capacity {
            return Err(AppError::validation(format!(
                "available seats {} outside [0, {}]",
                event.available_seats, event.capacity
            )));
        }

        match self.events.entry(event.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "event {} already exists",
                event.id
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(Mutex::new(EventSlot {
                    event: event.clone(),
                    registrations: HashMap::new(),
                })));
                Ok(event.clone())
            }
        }
    }

    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let Some(slot) = self.slot(event_id) else {
            return Ok(None);
        };
        let event = slot.lock().await.event.clone();
        Ok(Some(event))
    }

    async fn find_event_by_name(&self, name: &str) -> AppResult<Option<Event>> {
        let mut found: Option<Event> = None;
        for slot in self.all_slots() {
            let slot = slot.lock().await;
            if slot.event.name != name {
                continue;
            }
            if found
                .as_ref()
                .is_none_or(|f| slot.event.created_at < f.created_at)
            {
                found = Some(slot.event.clone());
            }
        }
        Ok(found)
    }

    async fn clear(&self) -> AppResult<()> {
        self.events.clear();
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
