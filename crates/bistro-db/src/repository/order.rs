//! # Order Repository
//!
//! Database operations for orders and their item join rows.
//!
//! ## Order/Item Relationship
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  orders                      order_items              items             │
//! │  ┌──────────────┐            ┌──────────────┐         ┌─────────────┐  │
//! │  │ id           │◄───────────│ order_id     │    ┌───►│ id          │  │
//! │  │ table_id     │            │ item_id      │────┘    │ price_cents │  │
//! │  │ status       │            │ (rowid keeps │         └─────────────┘  │
//! │  └──────────────┘            │  insertion   │                          │
//! │                              │  order)      │                          │
//! │                              └──────────────┘                          │
//! │                                                                         │
//! │  The same item may appear on an order more than once; each join row    │
//! │  is one unit of the item. remove_item deletes exactly one row.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::{Item, Order, OrderStatus};

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches an order by UUID.
pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, table_id, staff_id, status, created_at FROM orders WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(order)
}

/// Lists all orders, newest first.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, table_id, staff_id, status, created_at FROM orders ORDER BY created_at DESC",
    )
    .fetch_all(executor)
    .await?;

    Ok(orders)
}

/// Lists every order of one table. This is the input to the occupancy
/// derivation, so it must return ALL orders regardless of status.
pub async fn list_by_table(
    executor: impl SqliteExecutor<'_>,
    table_id: &str,
) -> DbResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, table_id, staff_id, status, created_at FROM orders \
         WHERE table_id = ?1 ORDER BY created_at",
    )
    .bind(table_id)
    .fetch_all(executor)
    .await?;

    Ok(orders)
}

/// Lists orders in a given status.
pub async fn list_by_status(
    executor: impl SqliteExecutor<'_>,
    status: OrderStatus,
) -> DbResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, table_id, staff_id, status, created_at FROM orders \
         WHERE status = ?1 ORDER BY created_at",
    )
    .bind(status)
    .fetch_all(executor)
    .await?;

    Ok(orders)
}

/// Inserts an order.
pub async fn insert(executor: impl SqliteExecutor<'_>, order: &Order) -> DbResult<()> {
    debug!(id = %order.id, table_id = %order.table_id, "Inserting order");

    sqlx::query(
        "INSERT INTO orders (id, table_id, staff_id, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&order.id)
    .bind(&order.table_id)
    .bind(&order.staff_id)
    .bind(order.status)
    .bind(order.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Writes an order's status.
pub async fn set_status(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    status: OrderStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
        .bind(id)
        .bind(status)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Order", id));
    }

    Ok(())
}

/// Deletes an order. Join rows and its receipt cascade.
pub async fn delete(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting order");

    let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Order", id));
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// Order item join rows
// -----------------------------------------------------------------------------

/// Adds one unit of an item to an order.
pub async fn add_item(
    executor: impl SqliteExecutor<'_>,
    order_id: &str,
    item_id: &str,
) -> DbResult<()> {
    debug!(order_id = %order_id, item_id = %item_id, "Adding order item");

    sqlx::query("INSERT INTO order_items (order_id, item_id) VALUES (?1, ?2)")
        .bind(order_id)
        .bind(item_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Removes one unit of an item from an order (the earliest join row).
///
/// Returns the number of rows removed: 0 means the order had no such item.
pub async fn remove_one_item(
    executor: impl SqliteExecutor<'_>,
    order_id: &str,
    item_id: &str,
) -> DbResult<u64> {
    debug!(order_id = %order_id, item_id = %item_id, "Removing order item");

    let result = sqlx::query(
        "DELETE FROM order_items WHERE rowid = ( \
             SELECT rowid FROM order_items \
             WHERE order_id = ?1 AND item_id = ?2 \
             ORDER BY rowid LIMIT 1)",
    )
    .bind(order_id)
    .bind(item_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Loads an order's items in insertion order, one entry per join row.
pub async fn list_items(
    executor: impl SqliteExecutor<'_>,
    order_id: &str,
) -> DbResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT i.id, i.name, i.price_cents, i.available, i.created_at \
         FROM order_items oi \
         INNER JOIN items i ON i.id = oi.item_id \
         WHERE oi.order_id = ?1 \
         ORDER BY oi.rowid",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;

    Ok(items)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        find_by_id(&self.pool, id).await
    }

    /// Lists all orders.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        list_all(&self.pool).await
    }

    /// Lists every order of one table.
    pub async fn list_by_table(&self, table_id: &str) -> DbResult<Vec<Order>> {
        list_by_table(&self.pool, table_id).await
    }

    /// Lists orders in a given status.
    pub async fn list_by_status(&self, status: OrderStatus) -> DbResult<Vec<Order>> {
        list_by_status(&self.pool, status).await
    }

    /// Loads an order's items in insertion order.
    pub async fn items(&self, order_id: &str) -> DbResult<Vec<Item>> {
        list_items(&self.pool, order_id).await
    }
}
