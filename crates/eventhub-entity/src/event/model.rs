//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use eventhub_core::types::{EventId, SeatCount};

/// A capacity-bearing event.
///
/// `capacity` never changes after creation. `available_seats` is only
/// moved by registering and cancelling and always stays in `[0, capacity]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Organizing party.
    pub organizer: String,
    /// Venue.
    pub location: String,
    /// When the event takes place.
    pub starts_at: DateTime<Utc>,
    /// Long-form description.
    pub description: String,
    /// Total seats.
    pub capacity: i32,
    /// Seats not yet taken.
    pub available_seats: i32,
    /// Catalogue category (e.g. "Music").
    pub category: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the seat count last changed.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Seat ledger view of this row.
    pub fn seat_count(&self) -> SeatCount {
        SeatCount {
            capacity: u32::try_from(self.capacity).unwrap_or(0),
            available: u32::try_from(self.available_seats).unwrap_or(0),
        }
    }

    /// Whether every seat is taken.
    pub fn is_sold_out(&self) -> bool {
        self.available_seats <= 0
    }
}

/// Data required to create an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEvent {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Organizing party.
    #[validate(length(min = 1, max = 200))]
    pub organizer: String,
    /// Venue.
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// When the event takes place.
    pub starts_at: DateTime<Utc>,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Total seats; every seat starts available.
    #[validate(range(min = 1))]
    pub capacity: i32,
    /// Catalogue category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewEvent {
    /// Materialize the event with a fresh id and a full seat ledger.
    pub fn into_event(self) -> Event {
        let now = Utc::now();
        Event {
            id: EventId::new(),
            name: self.name,
            organizer: self.organizer,
            location: self.location,
            starts_at: self.starts_at,
            description: self.description,
            capacity: self.capacity,
            available_seats: self.capacity,
            category: self.category,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(capacity: i32) -> NewEvent {
        NewEvent {
            name: "Web Dev Workshop".to_string(),
            organizer: "Code Masters".to_string(),
            location: "Seattle, WA".to_string(),
            starts_at: Utc::now(),
            description: String::new(),
            capacity,
            category: "Workshop".to_string(),
            tags: vec!["React".to_string()],
        }
    }

    #[test]
    fn test_new_event_starts_with_every_seat_available() {
        let event = sample(50).into_event();
        assert_eq!(event.available_seats, 50);
        assert_eq!(event.seat_count(), SeatCount::full(50));
        assert!(!event.is_sold_out());
    }

    #[test]
    fn test_capacity_must_be_positive() {
        assert!(sample(1).validate().is_ok());
        assert!(sample(0).validate().is_err());
        assert!(sample(-4).validate().is_err());
    }

    #[test]
    fn test_name_is_required() {
        let mut event = sample(10);
        event.name.clear();
        let errors = event.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
