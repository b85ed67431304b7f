//! # Menu Item Repository
//!
//! Database operations for menu items.
//!
//! Items are soft-deleted: `available = 0` removes them from ordering
//! without breaking historical `order_items` rows.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::Item;

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches an item by UUID.
pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        "SELECT id, name, price_cents, available, created_at FROM items WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(item)
}

/// Lists all items ordered by name.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT id, name, price_cents, available, created_at FROM items ORDER BY name",
    )
    .fetch_all(executor)
    .await?;

    Ok(items)
}

/// Inserts an item.
pub async fn insert(executor: impl SqliteExecutor<'_>, item: &Item) -> DbResult<()> {
    debug!(id = %item.id, name = %item.name, "Inserting item");

    sqlx::query(
        "INSERT INTO items (id, name, price_cents, available, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&item.id)
    .bind(&item.name)
    .bind(item.price_cents)
    .bind(item.available)
    .bind(item.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Sets an item's availability flag.
pub async fn set_available(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    available: bool,
) -> DbResult<()> {
    debug!(id = %id, available = available, "Setting item availability");

    let result = sqlx::query("UPDATE items SET available = ?2 WHERE id = ?1")
        .bind(id)
        .bind(available)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Item", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        find_by_id(&self.pool, id).await
    }

    /// Lists all items.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        list_all(&self.pool).await
    }

    /// Counts items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
