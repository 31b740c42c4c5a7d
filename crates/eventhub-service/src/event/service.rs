//! Event creation, lookup and catalogue seeding.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use validator::Validate;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::EventId;
use eventhub_database::store::EventStore;
use eventhub_entity::{Event, NewEvent};

use super::catalogue;

/// Outcome of seeding the sample catalogue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    /// Whether existing events were wiped first.
    pub reset: bool,
    /// Events inserted by this run.
    pub created: Vec<Event>,
    /// Names already present and left untouched.
    pub skipped: Vec<String>,
}

/// Manages the event catalogue.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Event store.
    events: Arc<dyn EventStore>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    /// Creates a new event with every seat available.
    pub async fn create(&self, req: NewEvent) -> AppResult<Event> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid event: {e}")))?;

        let event = self.events.create_event(&req.into_event()).await?;
        info!(
            event_id = %event.id,
            name = %event.name,
            capacity = event.capacity,
            "Event created"
        );
        Ok(event)
    }

    /// Gets an event by ID, including its current seat counts.
    pub async fn get(&self, event_id: EventId) -> AppResult<Event> {
        self.events
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {event_id} not found")))
    }

    /// Insert the sample catalogue, skipping names that already exist.
    ///
    /// With `reset`, every event and registration is removed first.
    pub async fn seed(&self, reset: bool) -> AppResult<SeedReport> {
        if reset {
            self.events.clear().await?;
            info!("Existing events and registrations removed");
        }

        let mut report = SeedReport {
            reset,
            ..SeedReport::default()
        };
        for sample in catalogue::sample_events()? {
            if self.events.find_event_by_name(&sample.name).await?.is_some() {
                report.skipped.push(sample.name);
                continue;
            }
            report.created.push(self.create(sample).await?);
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Sample events seeded"
        );
        Ok(report)
    }

    /// Whether the backing store is reachable.
    pub async fn health(&self) -> AppResult<bool> {
        self.events.health_check().await
    }
}
