//! Registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventhub_core::types::{EventId, RegistrationId, UserId};

use crate::event::Event;

/// A user's hold on one seat of one event.
///
/// The pair `(user_id, event_id)` is unique among live registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    /// Unique registration identifier.
    pub id: RegistrationId,
    /// The registered user.
    pub user_id: UserId,
    /// The event holding the seat.
    pub event_id: EventId,
    /// When the seat was taken.
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// A new registration record stamped now.
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            id: RegistrationId::new(),
            user_id,
            event_id,
            created_at: Utc::now(),
        }
    }
}

/// A registration together with the event it holds a seat on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDetail {
    /// The registration record.
    #[serde(flatten)]
    pub registration: Registration,
    /// The referenced event.
    pub event: Event,
}
