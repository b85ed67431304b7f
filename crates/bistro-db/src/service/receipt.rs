//! # Receipt Service
//!
//! Standalone receipt issuing and receipt queries.
//!
//! The usual way a receipt comes into being is the pay path
//! ([`crate::service::order::OrderService::pay`]). `issue_for_order` is
//! the secondary path: it freezes the same totals for an order WITHOUT
//! moving it to PAID, for a printed bill ahead of payment.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::repository::{order, receipt};
use crate::service::ServiceResult;
use bistro_core::payment::receipt_totals;
use bistro_core::{CoreError, Money, Receipt};

/// Service for receipt issuing and queries.
#[derive(Debug, Clone)]
pub struct ReceiptService {
    pool: SqlitePool,
}

impl ReceiptService {
    /// Creates a new ReceiptService.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptService { pool }
    }

    /// Issues a receipt for an order without changing the order's status.
    ///
    /// A zero total is permitted here; only the pay path refuses it. The
    /// one-receipt-per-order rule still holds: a second issue attempt
    /// fails on the UNIQUE order_id constraint.
    pub async fn issue_for_order(&self, order_id: &str, tip_cents: i64) -> ServiceResult<Receipt> {
        let mut tx = self.pool.begin().await?;

        if order::find_by_id(&mut *tx, order_id).await?.is_none() {
            return Err(CoreError::OrderNotFound(order_id.to_string()).into());
        }

        let items = order::list_items(&mut *tx, order_id).await?;
        let totals = receipt_totals(&items, Money::from_cents(tip_cents))?;

        let issued = Receipt {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            issued_at: Utc::now(),
            total_cents: totals.total.cents(),
            tip_cents: totals.tip.cents(),
            final_cents: totals.final_amount.cents(),
        };

        receipt::insert(&mut *tx, &issued).await?;
        tx.commit().await?;

        info!(order_id = %order_id, final_cents = issued.final_cents, "Receipt issued");
        Ok(issued)
    }

    /// Gets a receipt by id, as a required lookup.
    pub async fn get(&self, id: &str) -> ServiceResult<Receipt> {
        receipt::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::ReceiptNotFound(id.to_string()).into())
    }

    /// Lists receipts issued inside `[start, end]`, rejecting an inverted
    /// range.
    pub async fn list_issued_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Receipt>> {
        bistro_core::validation::validate_query_range(start, end)?;
        Ok(receipt::list_issued_between(&self.pool, start, end).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
