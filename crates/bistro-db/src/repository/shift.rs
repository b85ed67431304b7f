//! # Shift Repository
//!
//! Database operations for staff shifts.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::Shift;

const SELECT_COLUMNS: &str = "id, staff_id, start_time, end_time";

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches a shift by UUID.
pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SELECT_COLUMNS} FROM shifts WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(shift)
}

/// Lists all shifts ordered by start time.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SELECT_COLUMNS} FROM shifts ORDER BY start_time"
    ))
    .fetch_all(executor)
    .await?;

    Ok(shifts)
}

/// Lists every shift of one staff member: the set a candidate shift must
/// be checked against.
pub async fn list_by_staff(
    executor: impl SqliteExecutor<'_>,
    staff_id: &str,
) -> DbResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SELECT_COLUMNS} FROM shifts WHERE staff_id = ?1 ORDER BY start_time"
    ))
    .bind(staff_id)
    .fetch_all(executor)
    .await?;

    Ok(shifts)
}

/// Lists shifts whose start time falls inside `[start, end]`.
pub async fn list_starting_between(
    executor: impl SqliteExecutor<'_>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SELECT_COLUMNS} FROM shifts \
         WHERE start_time >= ?1 AND start_time <= ?2 ORDER BY start_time"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await?;

    Ok(shifts)
}

/// Inserts a shift.
pub async fn insert(executor: impl SqliteExecutor<'_>, shift: &Shift) -> DbResult<()> {
    debug!(id = %shift.id, staff_id = %shift.staff_id, "Inserting shift");

    sqlx::query(
        "INSERT INTO shifts (id, staff_id, start_time, end_time) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&shift.id)
    .bind(&shift.staff_id)
    .bind(shift.start_time)
    .bind(shift.end_time)
    .execute(executor)
    .await?;

    Ok(())
}

/// Writes a shift's interval.
pub async fn set_times(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE shifts SET start_time = ?2, end_time = ?3 WHERE id = ?1")
        .bind(id)
        .bind(start)
        .bind(end)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Shift", id));
    }

    Ok(())
}

/// Deletes a shift.
pub async fn delete(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting shift");

    let result = sqlx::query("DELETE FROM shifts WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Shift", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for shift database operations.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    /// Creates a new ShiftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftRepository { pool }
    }

    /// Gets a shift by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Shift>> {
        find_by_id(&self.pool, id).await
    }

    /// Lists all shifts.
    pub async fn list(&self) -> DbResult<Vec<Shift>> {
        list_all(&self.pool).await
    }

    /// Lists every shift of one staff member.
    pub async fn list_by_staff(&self, staff_id: &str) -> DbResult<Vec<Shift>> {
        list_by_staff(&self.pool, staff_id).await
    }

    /// Lists shifts whose start time falls inside `[start, end]`.
    pub async fn list_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Shift>> {
        list_starting_between(&self.pool, start, end).await
    }
}
