//! # Reservation Repository
//!
//! Database operations for reservations.
//!
//! The conflict-relevant query is [`list_active_for_table`]: cancelled
//! reservations release their slot and are excluded there.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::{Reservation, ReservationStatus};

const SELECT_COLUMNS: &str = "id, table_id, customer_name, start_time, end_time, status";

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches a reservation by UUID.
pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: &str,
) -> DbResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(reservation)
}

/// Lists all reservations ordered by start time.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations ORDER BY start_time"
    ))
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Lists every reservation of one table.
pub async fn list_by_table(
    executor: impl SqliteExecutor<'_>,
    table_id: &str,
) -> DbResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations WHERE table_id = ?1 ORDER BY start_time"
    ))
    .bind(table_id)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Lists the non-cancelled reservations of one table: the set a candidate
/// slot must be checked against.
pub async fn list_active_for_table(
    executor: impl SqliteExecutor<'_>,
    table_id: &str,
) -> DbResult<Vec<Reservation>> {
    let cancelled = ReservationStatus::Cancelled;

    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations \
         WHERE table_id = ?1 AND status != ?2 ORDER BY start_time"
    ))
    .bind(table_id)
    .bind(cancelled)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Lists reservations whose start time falls inside `[start, end]`.
pub async fn list_starting_between(
    executor: impl SqliteExecutor<'_>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations \
         WHERE start_time >= ?1 AND start_time <= ?2 ORDER BY start_time"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Inserts a reservation.
pub async fn insert(executor: impl SqliteExecutor<'_>, reservation: &Reservation) -> DbResult<()> {
    debug!(
        id = %reservation.id,
        table_id = %reservation.table_id,
        "Inserting reservation"
    );

    sqlx::query(
        "INSERT INTO reservations (id, table_id, customer_name, start_time, end_time, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&reservation.id)
    .bind(&reservation.table_id)
    .bind(&reservation.customer_name)
    .bind(reservation.start_time)
    .bind(reservation.end_time)
    .bind(reservation.status)
    .execute(executor)
    .await?;

    Ok(())
}

/// Writes a reservation's status.
pub async fn set_status(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    status: ReservationStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE reservations SET status = ?2 WHERE id = ?1")
        .bind(id)
        .bind(status)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Reservation", id));
    }

    Ok(())
}

/// Writes a reservation's time slot.
pub async fn set_times(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE reservations SET start_time = ?2, end_time = ?3 WHERE id = ?1")
        .bind(id)
        .bind(start)
        .bind(end)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Reservation", id));
    }

    Ok(())
}

/// Deletes a reservation.
pub async fn delete(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting reservation");

    let result = sqlx::query("DELETE FROM reservations WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Reservation", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Gets a reservation by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        find_by_id(&self.pool, id).await
    }

    /// Lists all reservations.
    pub async fn list(&self) -> DbResult<Vec<Reservation>> {
        list_all(&self.pool).await
    }

    /// Lists every reservation of one table.
    pub async fn list_by_table(&self, table_id: &str) -> DbResult<Vec<Reservation>> {
        list_by_table(&self.pool, table_id).await
    }

    /// Lists reservations whose start time falls inside `[start, end]`.
    pub async fn list_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Reservation>> {
        list_starting_between(&self.pool, start, end).await
    }
}
