//! Seat accounting snapshot shared by the ledger implementations.

use serde::{Deserialize, Serialize};

/// A consistent view of one event's seat ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCount {
    /// Fixed number of seats the event was created with.
    pub capacity: u32,
    /// Seats not yet held by a registration.
    pub available: u32,
}

impl SeatCount {
    /// A fresh ledger with every seat available.
    pub fn full(capacity: u32) -> Self {
        Self {
            capacity,
            available: capacity,
        }
    }

    /// Seats currently held by registrations.
    pub fn taken(&self) -> u32 {
        self.capacity.saturating_sub(self.available)
    }

    /// Whether no seat is left.
    pub fn is_sold_out(&self) -> bool {
        self.available == 0
    }

    /// Whether `0 <= available <= capacity` holds.
    pub fn is_consistent(&self) -> bool {
        self.available <= self.capacity
    }
}
