//! Registration repository: transactional register/cancel on PostgreSQL.
//!
//! Lock order is always the event row first and the registration row
//! second, in both directions, so register and cancel never deadlock
//! against each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::debug;

use eventhub_core::error::{AppError, CancelError, RegisterError};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, RegistrationId, UserId};
use eventhub_entity::{Event, Registration, RegistrationDetail};

use crate::error::{is_unique_violation, map_sqlx};
use crate::repositories::event::EventRepository;
use crate::store::RegistrationStore;

/// Repository for registration records.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

/// A registration joined with its event.
#[derive(Debug, FromRow)]
struct DetailRow {
    registration_id: RegistrationId,
    user_id: UserId,
    registered_at: DateTime<Utc>,
    #[sqlx(flatten)]
    event: Event,
}

impl From<DetailRow> for RegistrationDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            registration: Registration {
                id: row.registration_id,
                user_id: row.user_id,
                event_id: row.event.id,
                created_at: row.registered_at,
            },
            event: row.event,
        }
    }
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(map_sqlx("Failed to begin transaction"))
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Registration, RegisterError> {
        let mut tx = self.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx("Failed to look up event"))?;
        if exists.is_none() {
            return Err(RegisterError::EventNotFound(event_id));
        }

        let existing: Option<RegistrationId> = sqlx::query_scalar(
            "SELECT id FROM registrations WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx("Failed to look up registration"))?;
        if existing.is_some() {
            return Err(RegisterError::AlreadyRegistered { user_id, event_id });
        }

        let seats = EventRepository::reserve_seat(&mut tx, event_id).await?;

        // A concurrent request for the same pair can pass the check above;
        // the UNIQUE constraint catches it here and the rollback returns the seat.
        let registration = Registration::new(user_id, event_id);
        let inserted = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, user_id, event_id, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id, user_id, event_id, created_at",
        )
        .bind(registration.id)
        .bind(registration.user_id)
        .bind(registration.event_id)
        .bind(registration.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RegisterError::AlreadyRegistered { user_id, event_id }
            } else {
                RegisterError::Store(map_sqlx("Failed to insert registration")(e))
            }
        })?;

        tx.commit()
            .await
            .map_err(map_sqlx("Failed to commit registration"))?;

        debug!(
            user_id = %user_id,
            event_id = %event_id,
            available_seats = seats.available,
            "Registration committed"
        );
        Ok(inserted)
    }

    async fn cancel(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Registration, CancelError> {
        let mut tx = self.begin().await?;

        let locked: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx("Failed to lock event"))?;
        if locked.is_none() {
            // Registrations cascade with their event, so none can exist.
            return Err(CancelError::NotRegistered { user_id, event_id });
        }

        let removed = sqlx::query_as::<_, Registration>(
            "DELETE FROM registrations WHERE user_id = $1 AND event_id = $2 \
             RETURNING id, user_id, event_id, created_at",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx("Failed to delete registration"))?
        .ok_or(CancelError::NotRegistered { user_id, event_id })?;

        // An Inconsistent release drops the transaction, restoring the record.
        let seats = EventRepository::release_seat(&mut tx, event_id).await?;

        tx.commit()
            .await
            .map_err(map_sqlx("Failed to commit cancellation"))?;

        debug!(
            user_id = %user_id,
            event_id = %event_id,
            available_seats = seats.available,
            "Cancellation committed"
        );
        Ok(removed)
    }

    async fn find(&self, user_id: UserId, event_id: EventId) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT id, user_id, event_id, created_at FROM registrations \
             WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("Failed to find registration"))
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<RegistrationDetail>> {
        let rows = sqlx::query_as::<_, DetailRow>(
            "SELECT r.id AS registration_id, r.user_id, r.created_at AS registered_at, \
                    e.id, e.name, e.organizer, e.location, e.starts_at, e.description, \
                    e.capacity, e.available_seats, e.category, e.tags, e.created_at, e.updated_at \
             FROM registrations r \
             JOIN events e ON e.id = r.event_id \
             WHERE r.user_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("Failed to list registrations"))?;

        Ok(rows.into_iter().map(RegistrationDetail::from).collect())
    }
}
