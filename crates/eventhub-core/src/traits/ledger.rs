//! Seat ledger trait for concurrent seat accounting.

use async_trait::async_trait;

use crate::error::CapacityError;
use crate::types::id::EventId;
use crate::types::seat::SeatCount;

/// Trait for atomic seat accounting on capacity-bearing events.
///
/// Implementations must guarantee that every mutation is a single
/// check-and-mutate step: a reservation either takes a seat or fails
/// with no observable intermediate state. Two implementations are provided:
/// - PostgreSQL (conditional `UPDATE ... RETURNING`)
/// - In-memory (per-event `tokio::sync::Mutex`)
#[async_trait]
pub trait CapacityLedger: Send + Sync + std::fmt::Debug {
    /// Take one seat if any is left.
    ///
    /// Fails with [`CapacityError::SoldOut`] when `available == 0` and
    /// [`CapacityError::NotFound`] for an unknown event.
    async fn try_reserve(&self, event_id: EventId) -> Result<SeatCount, CapacityError>;

    /// Give one seat back.
    ///
    /// Fails with [`CapacityError::Inconsistent`] instead of clamping when
    /// the event is already at full capacity.
    async fn release(&self, event_id: EventId) -> Result<SeatCount, CapacityError>;

    /// Read the current seat counts.
    async fn seats(&self, event_id: EventId) -> Result<SeatCount, CapacityError>;
}
