//! Registration and cancellation of seats on events.

use std::sync::Arc;

use tracing::{info, warn};

use eventhub_core::error::{CancelError, CapacityError, RegisterError};
use eventhub_core::result::AppResult;
use eventhub_core::traits::CapacityLedger;
use eventhub_core::types::{EventId, SeatCount, UserId};
use eventhub_database::store::RegistrationStore;
use eventhub_entity::{Registration, RegistrationDetail, RegistrationState};

use crate::context::RequestContext;
use crate::retry::RetryPolicy;

/// Registers users for events and cancels their registrations.
///
/// Every mutation goes through the store as one atomic unit, so the seat
/// ledger and the registration records never drift apart. Transient store
/// contention is retried under the configured policy.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    /// Registration records, kept in lockstep with the ledger.
    registrations: Arc<dyn RegistrationStore>,
    /// Seat ledger, read-only from here.
    ledger: Arc<dyn CapacityLedger>,
    /// Retry policy for transient failures.
    retry: RetryPolicy,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        ledger: Arc<dyn CapacityLedger>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            registrations,
            ledger,
            retry,
        }
    }

    /// Take a seat on `event_id` for the caller.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
    ) -> Result<Registration, RegisterError> {
        let user_id = ctx.user_id;
        let result = self
            .retry
            .run("register", || self.registrations.register(user_id, event_id))
            .await;

        match &result {
            Ok(registration) => info!(
                user_id = %user_id,
                event_id = %event_id,
                registration_id = %registration.id,
                "User registered for event"
            ),
            Err(RegisterError::Store(e)) => warn!(
                user_id = %user_id,
                event_id = %event_id,
                error = %e,
                "Registration failed"
            ),
            Err(e) => info!(
                user_id = %user_id,
                event_id = %event_id,
                outcome = %e,
                "Registration refused"
            ),
        }
        result
    }

    /// Give up the caller's seat on `event_id`.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
    ) -> Result<Registration, CancelError> {
        let user_id = ctx.user_id;
        let result = self
            .retry
            .run("cancel", || self.registrations.cancel(user_id, event_id))
            .await;

        match &result {
            Ok(_) => info!(user_id = %user_id, event_id = %event_id, "Registration cancelled"),
            Err(CancelError::NotRegistered { .. }) => info!(
                user_id = %user_id,
                event_id = %event_id,
                "Cancellation refused: not registered"
            ),
            Err(e) => warn!(
                user_id = %user_id,
                event_id = %event_id,
                error = %e,
                "Cancellation failed"
            ),
        }
        result
    }

    /// The caller's registrations with their events, newest first.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> AppResult<Vec<RegistrationDetail>> {
        let user_id = ctx.user_id;
        self.retry
            .run("list_for_user", || self.registrations.list_for_user(user_id))
            .await
    }

    /// Current state of the (user, event) pair.
    pub async fn state(&self, user_id: UserId, event_id: EventId) -> AppResult<RegistrationState> {
        let found = self.registrations.find(user_id, event_id).await?;
        Ok(RegistrationState::from_exists(found.is_some()))
    }

    /// Current seat counts of an event.
    pub async fn seats(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        self.ledger.seats(event_id).await
    }
}
