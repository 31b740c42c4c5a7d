//! Event repository and the PostgreSQL seat ledger.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, warn};

use eventhub_core::error::{AppError, CapacityError};
use eventhub_core::result::AppResult;
use eventhub_core::traits::CapacityLedger;
use eventhub_core::types::{EventId, SeatCount};
use eventhub_entity::Event;

use crate::error::map_sqlx;
use crate::store::EventStore;

/// Repository for event rows and their seat counts.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Take one seat with a single conditional update.
    ///
    /// Runs on the caller's connection so it can share a transaction with
    /// the registration insert. The row lock taken here is held until that
    /// transaction ends, serializing seat changes per event.
    pub async fn reserve_seat(
        conn: &mut PgConnection,
        event_id: EventId,
    ) -> Result<SeatCount, CapacityError> {
        let row: Option<(i32, i32)> = sqlx::query_as(
            "UPDATE events SET available_seats = available_seats - 1, updated_at = NOW() \
             WHERE id = $1 AND available_seats > 0 \
             RETURNING capacity, available_seats",
        )
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx("Failed to reserve seat"))?;

        match row {
            Some(counts) => Ok(to_seat_count(counts)),
            None => match Self::load_seats(conn, event_id).await? {
                None => Err(CapacityError::NotFound(event_id)),
                Some(_) => Err(CapacityError::SoldOut(event_id)),
            },
        }
    }

    /// Give one seat back, refusing to exceed capacity.
    pub async fn release_seat(
        conn: &mut PgConnection,
        event_id: EventId,
    ) -> Result<SeatCount, CapacityError> {
        let row: Option<(i32, i32)> = sqlx::query_as(
            "UPDATE events SET available_seats = available_seats + 1, updated_at = NOW() \
             WHERE id = $1 AND available_seats < capacity \
             RETURNING capacity, available_seats",
        )
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx("Failed to release seat"))?;

        match row {
            Some(counts) => Ok(to_seat_count(counts)),
            None => match Self::load_seats(conn, event_id).await? {
                None => Err(CapacityError::NotFound(event_id)),
                Some(seats) => {
                    warn!(
                        event_id = %event_id,
                        capacity = seats.capacity,
                        available_seats = seats.available,
                        "Seat release without a matching reservation"
                    );
                    Err(CapacityError::Inconsistent {
                        event_id,
                        capacity: seats.capacity,
                    })
                }
            },
        }
    }

    /// Read the seat counts of one event.
    pub async fn load_seats(
        conn: &mut PgConnection,
        event_id: EventId,
    ) -> Result<Option<SeatCount>, AppError> {
        let row: Option<(i32, i32)> =
            sqlx::query_as("SELECT capacity, available_seats FROM events WHERE id = $1")
                .bind(event_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(map_sqlx("Failed to load seat counts"))?;
        Ok(row.map(to_seat_count))
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, AppError> {
        self.pool
            .acquire()
            .await
            .map_err(map_sqlx("Failed to acquire connection"))
    }
}

fn to_seat_count((capacity, available): (i32, i32)) -> SeatCount {
    SeatCount {
        capacity: u32::try_from(capacity).unwrap_or(0),
        available: u32::try_from(available).unwrap_or(0),
    }
}

#[async_trait]
impl CapacityLedger for EventRepository {
    async fn try_reserve(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let mut conn = self.acquire().await?;
        let seats = Self::reserve_seat(&mut conn, event_id).await?;
        debug!(event_id = %event_id, available_seats = seats.available, "Seat reserved");
        Ok(seats)
    }

    async fn release(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let mut conn = self.acquire().await?;
        let seats = Self::release_seat(&mut conn, event_id).await?;
        debug!(event_id = %event_id, available_seats = seats.available, "Seat released");
        Ok(seats)
    }

    async fn seats(&self, event_id: EventId) -> Result<SeatCount, CapacityError> {
        let mut conn = self.acquire().await?;
        Self::load_seats(&mut conn, event_id)
            .await?
            .ok_or(CapacityError::NotFound(event_id))
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create_event(&self, event: &Event) -> AppResult<Event> {
        if event.available_seats < 0 || event.available_seats > event.capacity {
            return Err(AppError::validation(format!(
                "available seats {} outside [0, {}]",
                event.available_seats, event.capacity
            )));
        }

        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, organizer, location, starts_at, description, \
             capacity, available_seats, category, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.organizer)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(&event.description)
        .bind(event.capacity)
        .bind(event.available_seats)
        .bind(&event.category)
        .bind(&event.tags)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx("Failed to create event"))
    }

    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("Failed to find event"))
    }

    async fn find_event_by_name(&self, name: &str) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE name = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("Failed to find event by name"))
    }

    async fn clear(&self) -> AppResult<()> {
        // Registrations go with their events through ON DELETE CASCADE.
        sqlx::query("DELETE FROM events")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx("Failed to clear events"))?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(map_sqlx("Health check failed"))
    }
}
