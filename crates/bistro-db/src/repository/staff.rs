//! # Staff Repository
//!
//! Database operations for staff members.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::Staff;

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches a staff member by UUID.
pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, name, role, created_at FROM staff WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(staff)
}

/// Lists all staff members ordered by name.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, name, role, created_at FROM staff ORDER BY name",
    )
    .fetch_all(executor)
    .await?;

    Ok(staff)
}

/// Inserts a staff member.
pub async fn insert(executor: impl SqliteExecutor<'_>, staff: &Staff) -> DbResult<()> {
    debug!(id = %staff.id, name = %staff.name, "Inserting staff member");

    sqlx::query("INSERT INTO staff (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&staff.id)
        .bind(&staff.name)
        .bind(staff.role)
        .bind(staff.created_at)
        .execute(executor)
        .await?;

    Ok(())
}

/// Deletes a staff member. Their shifts cascade.
pub async fn delete(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting staff member");

    let result = sqlx::query("DELETE FROM staff WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Staff", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for staff database operations.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    /// Gets a staff member by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Staff>> {
        find_by_id(&self.pool, id).await
    }

    /// Lists all staff members.
    pub async fn list(&self) -> DbResult<Vec<Staff>> {
        list_all(&self.pool).await
    }

    /// Counts staff members (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
