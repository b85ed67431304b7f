//! # Receipt Repository
//!
//! Database operations for receipts.
//!
//! Receipts are write-once: there is no update path, and the UNIQUE
//! constraint on `order_id` enforces at most one receipt per order at the
//! storage level.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bistro_core::Receipt;

const SELECT_COLUMNS: &str = "id, order_id, issued_at, total_cents, tip_cents, final_cents";

// =============================================================================
// Executor-Generic Queries
// =============================================================================

/// Fetches a receipt by UUID.
pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<Option<Receipt>> {
    let receipt = sqlx::query_as::<_, Receipt>(&format!(
        "SELECT {SELECT_COLUMNS} FROM receipts WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(receipt)
}

/// Fetches the receipt of an order, if one was issued.
pub async fn find_by_order(
    executor: impl SqliteExecutor<'_>,
    order_id: &str,
) -> DbResult<Option<Receipt>> {
    let receipt = sqlx::query_as::<_, Receipt>(&format!(
        "SELECT {SELECT_COLUMNS} FROM receipts WHERE order_id = ?1"
    ))
    .bind(order_id)
    .fetch_optional(executor)
    .await?;

    Ok(receipt)
}

/// Lists all receipts, newest first.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<Receipt>> {
    let receipts = sqlx::query_as::<_, Receipt>(&format!(
        "SELECT {SELECT_COLUMNS} FROM receipts ORDER BY issued_at DESC"
    ))
    .fetch_all(executor)
    .await?;

    Ok(receipts)
}

/// Lists receipts issued inside `[start, end]`.
pub async fn list_issued_between(
    executor: impl SqliteExecutor<'_>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<Vec<Receipt>> {
    let receipts = sqlx::query_as::<_, Receipt>(&format!(
        "SELECT {SELECT_COLUMNS} FROM receipts \
         WHERE issued_at >= ?1 AND issued_at <= ?2 ORDER BY issued_at"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await?;

    Ok(receipts)
}

/// Inserts a receipt.
pub async fn insert(executor: impl SqliteExecutor<'_>, receipt: &Receipt) -> DbResult<()> {
    debug!(
        id = %receipt.id,
        order_id = %receipt.order_id,
        final_cents = receipt.final_cents,
        "Inserting receipt"
    );

    sqlx::query(
        "INSERT INTO receipts (id, order_id, issued_at, total_cents, tip_cents, final_cents) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&receipt.id)
    .bind(&receipt.order_id)
    .bind(receipt.issued_at)
    .bind(receipt.total_cents)
    .bind(receipt.tip_cents)
    .bind(receipt.final_cents)
    .execute(executor)
    .await?;

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Gets a receipt by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        find_by_id(&self.pool, id).await
    }

    /// Gets the receipt of an order, if one was issued.
    pub async fn get_by_order(&self, order_id: &str) -> DbResult<Option<Receipt>> {
        find_by_order(&self.pool, order_id).await
    }

    /// Lists all receipts.
    pub async fn list(&self) -> DbResult<Vec<Receipt>> {
        list_all(&self.pool).await
    }
}
