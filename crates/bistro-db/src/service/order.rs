//! # Order Service
//!
//! Order lifecycle and the pay path.
//!
//! ## Occupancy Coupling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every order mutation ends with the same two steps, inside the same    │
//! │  transaction as the mutation itself:                                   │
//! │                                                                         │
//! │    orders = all orders of the table (any status)                       │
//! │    table.table_status = compute_table_status(orders)   ← bistro-core   │
//! │    table.order_status = aggregate_order_status(orders)                 │
//! │                                                                         │
//! │  So a table can never be observed with an open order and status        │
//! │  AVAILABLE, or with all orders terminal and status OCCUPIED.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pay Path
//! ```text
//! pay(order, tip)
//!   ├── CANCELLED?            → "Cannot pay for a cancelled order"
//!   ├── PAID?                 → "Order is already paid"
//!   ├── total == 0?           → "Cannot pay for an order with zero total amount"
//!   ├── order → PAID, receipt inserted (totals frozen)
//!   ├── occupancy recomputed (PAID is terminal)
//!   └── table's assigned staff released
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::repository::{item, order, receipt, staff, table};
use crate::service::ServiceResult;
use bistro_core::occupancy::{aggregate_order_status, compute_table_status};
use bistro_core::payment::receipt_totals;
use bistro_core::{CoreError, Item, Money, Order, OrderStatus, Receipt, ValidationError};

/// Service for the order lifecycle.
#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    /// Creates a new OrderService.
    pub fn new(pool: SqlitePool) -> Self {
        OrderService { pool }
    }

    /// Opens an order at a table.
    ///
    /// Requested items are resolved against the menu; ids that are unknown
    /// or retired are skipped. An order with no resolvable items is
    /// rejected. The serving staff member is recorded on the order and
    /// assigned to the table.
    pub async fn create(
        &self,
        table_id: &str,
        staff_id: &str,
        item_ids: &[String],
    ) -> ServiceResult<Order> {
        self.create_with_status(table_id, staff_id, item_ids, OrderStatus::Pending)
            .await
    }

    /// Opens an order with an explicit initial status, for callers whose
    /// order is already being worked when it is recorded.
    ///
    /// Item resolution and the occupancy recompute are identical to
    /// [`create`](Self::create); the status flows into
    /// `compute_table_status`, so an order opened in a terminal status
    /// does not occupy the table.
    pub async fn create_with_status(
        &self,
        table_id: &str,
        staff_id: &str,
        item_ids: &[String],
        initial_status: OrderStatus,
    ) -> ServiceResult<Order> {
        let mut tx = self.pool.begin().await?;

        if table::find_by_id(&mut *tx, table_id).await?.is_none() {
            return Err(CoreError::TableNotFound(table_id.to_string()).into());
        }
        if staff::find_by_id(&mut *tx, staff_id).await?.is_none() {
            return Err(CoreError::StaffNotFound(staff_id.to_string()).into());
        }

        let mut resolved: Vec<Item> = Vec::with_capacity(item_ids.len());
        for item_id in item_ids {
            if let Some(found) = item::find_by_id(&mut *tx, item_id).await? {
                if found.available {
                    resolved.push(found);
                }
            }
        }
        if resolved.is_empty() {
            return Err(ValidationError::NoItems.into());
        }

        let opened = Order {
            id: Uuid::new_v4().to_string(),
            table_id: table_id.to_string(),
            staff_id: staff_id.to_string(),
            status: initial_status,
            created_at: Utc::now(),
        };

        order::insert(&mut *tx, &opened).await?;
        for resolved_item in &resolved {
            order::add_item(&mut *tx, &opened.id, &resolved_item.id).await?;
        }

        table::set_assigned_staff(&mut *tx, table_id, Some(staff_id)).await?;
        refresh_table(&mut tx, table_id).await?;
        tx.commit().await?;

        info!(
            id = %opened.id,
            table_id = %table_id,
            items = resolved.len(),
            "Order created"
        );
        Ok(opened)
    }

    /// Adds one unit of an item to an open order.
    pub async fn add_item(&self, order_id: &str, item_id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let open = require_order(&mut tx, order_id).await?;
        if !open.status.allows_item_changes() {
            return Err(CoreError::OrderNotEditable {
                order_id: order_id.to_string(),
                status: open.status,
            }
            .into());
        }

        if item::find_by_id(&mut *tx, item_id).await?.is_none() {
            return Err(CoreError::ItemNotFound(item_id.to_string()).into());
        }

        order::add_item(&mut *tx, order_id, item_id).await?;
        tx.commit().await?;

        info!(order_id = %order_id, item_id = %item_id, "Item added to order");
        Ok(())
    }

    /// Removes one unit of an item from an open order.
    pub async fn remove_item(&self, order_id: &str, item_id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let open = require_order(&mut tx, order_id).await?;
        if !open.status.allows_item_changes() {
            return Err(CoreError::OrderNotEditable {
                order_id: order_id.to_string(),
                status: open.status,
            }
            .into());
        }

        let removed = order::remove_one_item(&mut *tx, order_id, item_id).await?;
        if removed == 0 {
            return Err(CoreError::ItemNotFound(item_id.to_string()).into());
        }

        tx.commit().await?;

        info!(order_id = %order_id, item_id = %item_id, "Item removed from order");
        Ok(())
    }

    /// Moves an order through its state machine and recomputes the table's
    /// occupancy.
    ///
    /// CANCELLED and PAID accept no further transitions; COMPLETED may
    /// only move to CANCELLED or PAID (paying goes through
    /// [`pay`](Self::pay), which also writes the receipt).
    pub async fn set_status(&self, order_id: &str, next: OrderStatus) -> ServiceResult<Order> {
        let mut tx = self.pool.begin().await?;

        let mut current = require_order(&mut tx, order_id).await?;
        if !current.status.can_transition_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: order_id.to_string(),
                from: current.status,
                to: next,
            }
            .into());
        }

        order::set_status(&mut *tx, order_id, next).await?;
        refresh_table(&mut tx, &current.table_id).await?;
        tx.commit().await?;

        current.status = next;
        info!(order_id = %order_id, status = ?next, "Order status changed");
        Ok(current)
    }

    /// Cancels an order. Equivalent to a status change to CANCELLED, with
    /// the same guards and the same occupancy recompute.
    pub async fn cancel(&self, order_id: &str) -> ServiceResult<Order> {
        self.set_status(order_id, OrderStatus::Cancelled).await
    }

    /// Deletes an order outright; join rows and any receipt cascade, and
    /// the table's occupancy is recomputed without it.
    pub async fn delete(&self, order_id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let doomed = require_order(&mut tx, order_id).await?;

        order::delete(&mut *tx, order_id).await?;
        refresh_table(&mut tx, &doomed.table_id).await?;
        tx.commit().await?;

        info!(order_id = %order_id, "Order deleted");
        Ok(())
    }

    /// Pays an order: freezes its totals into a receipt, marks it PAID,
    /// recomputes the table's occupancy and releases the table's assigned
    /// staff member.
    pub async fn pay(&self, order_id: &str, tip_cents: i64) -> ServiceResult<Receipt> {
        let mut tx = self.pool.begin().await?;

        let open = require_order(&mut tx, order_id).await?;
        match open.status {
            OrderStatus::Cancelled => return Err(CoreError::OrderCancelled.into()),
            OrderStatus::Paid => return Err(CoreError::OrderAlreadyPaid.into()),
            _ => {}
        }

        let items = order::list_items(&mut *tx, order_id).await?;
        let totals = receipt_totals(&items, Money::from_cents(tip_cents))?;
        if totals.total.is_zero() {
            return Err(CoreError::ZeroOrderTotal.into());
        }

        order::set_status(&mut *tx, order_id, OrderStatus::Paid).await?;

        let issued = Receipt {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            issued_at: Utc::now(),
            total_cents: totals.total.cents(),
            tip_cents: totals.tip.cents(),
            final_cents: totals.final_amount.cents(),
        };
        receipt::insert(&mut *tx, &issued).await?;

        refresh_table(&mut tx, &open.table_id).await?;
        table::set_assigned_staff(&mut *tx, &open.table_id, None).await?;
        tx.commit().await?;

        info!(
            order_id = %order_id,
            final_cents = issued.final_cents,
            "Order paid"
        );
        Ok(issued)
    }
}

/// Loads an order inside a transaction or fails with OrderNotFound.
async fn require_order(tx: &mut SqliteConnection, order_id: &str) -> ServiceResult<Order> {
    order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()).into())
}

/// Recomputes a table's derived statuses from ALL of its orders.
async fn refresh_table(tx: &mut SqliteConnection, table_id: &str) -> ServiceResult<()> {
    let orders = order::list_by_table(&mut *tx, table_id).await?;
    table::set_statuses(
        &mut *tx,
        table_id,
        compute_table_status(&orders),
        aggregate_order_status(&orders),
    )
    .await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bistro_core::{Shape, StaffRole, TableStatus};

    struct Fixture {
        db: Database,
        table_id: String,
        staff_id: String,
        pizza: String,
        cola: String,
        bread: String, // complimentary, price 0
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let table_id = db
            .table_service()
            .create(1, 1, Shape::Rectangle { x: 0, y: 0, width: 100, height: 100 })
            .await
            .unwrap()
            .id;
        let staff_id = db
            .staff_service()
            .create("Alice", StaffRole::Waiter)
            .await
            .unwrap()
            .id;
        let pizza = db.item_service().create("Margherita", 1250).await.unwrap().id;
        let cola = db.item_service().create("Cola", 350).await.unwrap().id;
        let bread = db.item_service().create("Bread Basket", 0).await.unwrap().id;

        Fixture { db, table_id, staff_id, pizza, cola, bread }
    }

    #[tokio::test]
    async fn test_create_occupies_table_and_assigns_staff() {
        let f = fixture().await;

        let opened = f
            .db
            .order_service()
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone(), f.cola.clone()])
            .await
            .unwrap();
        assert_eq!(opened.status, OrderStatus::Pending);

        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Occupied);
        assert_eq!(table.assigned_staff_id.as_deref(), Some(f.staff_id.as_str()));

        let items = f.db.orders().items(&opened.id).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_create_with_explicit_initial_status() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create_with_status(
                &f.table_id,
                &f.staff_id,
                &[f.pizza.clone()],
                OrderStatus::InProgress,
            )
            .await
            .unwrap();
        assert_eq!(opened.status, OrderStatus::InProgress);

        let stored = f.db.orders().get_by_id(&opened.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::InProgress);

        // An in-progress order occupies the table like a pending one.
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Occupied);
        assert_eq!(table.order_status, OrderStatus::InProgress);
    }

    #[tokio::test]
    async fn test_order_without_valid_items_is_rejected() {
        let f = fixture().await;
        let service = f.db.order_service();

        let err = service
            .create(&f.table_id, &f.staff_id, &[])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No valid items found for the order");

        // Unknown ids resolve to nothing.
        let err = service
            .create(&f.table_id, &f.staff_id, &["ghost".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No valid items found for the order");

        // Retired items do not count either.
        f.db.item_service().set_available(&f.pizza, false).await.unwrap();
        let err = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No valid items found for the order");

        // No partial state: the table is untouched.
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
        assert!(table.assigned_staff_id.is_none());
    }

    #[tokio::test]
    async fn test_item_changes_blocked_after_completion() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();

        service.add_item(&opened.id, &f.cola).await.unwrap();
        service.remove_item(&opened.id, &f.cola).await.unwrap();

        service
            .set_status(&opened.id, OrderStatus::Completed)
            .await
            .unwrap();

        let err = service.add_item(&opened.id, &f.cola).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::OrderNotEditable { .. })
        ));
        let err = service.remove_item(&opened.id, &f.pizza).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::OrderNotEditable { .. })
        ));
    }

    #[tokio::test]
    async fn test_removing_absent_item_fails() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();

        let err = service.remove_item(&opened.id, &f.cola).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_items_remove_one_unit_at_a_time() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.cola.clone(), f.cola.clone()])
            .await
            .unwrap();
        assert_eq!(f.db.orders().items(&opened.id).await.unwrap().len(), 2);

        service.remove_item(&opened.id, &f.cola).await.unwrap();
        assert_eq!(f.db.orders().items(&opened.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_terminal_statuses_reject_transitions() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();
        service.cancel(&opened.id).await.unwrap();

        let err = service
            .set_status(&opened.id, OrderStatus::InProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::InvalidStatusTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelling_last_order_frees_the_table() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Occupied);

        service.cancel(&opened.id).await.unwrap();
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
        assert_eq!(table.order_status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_table_stays_occupied_while_any_order_is_open() {
        let f = fixture().await;
        let service = f.db.order_service();

        let first = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();
        service
            .create(&f.table_id, &f.staff_id, &[f.cola.clone()])
            .await
            .unwrap();

        service.pay(&first.id, 0).await.unwrap();

        // Second order is still open.
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_pay_freezes_totals_and_releases_staff() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone(), f.cola.clone()])
            .await
            .unwrap();

        let issued = service.pay(&opened.id, 500).await.unwrap();
        assert_eq!(issued.total_cents, 1600);
        assert_eq!(issued.tip_cents, 500);
        assert_eq!(issued.final_cents, 2100);

        let paid = f.db.orders().get_by_id(&opened.id).await.unwrap().unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);

        // PAID is terminal: table frees up and the staff member moves on.
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
        assert!(table.assigned_staff_id.is_none());

        let stored = f.db.receipts().get_by_order(&opened.id).await.unwrap().unwrap();
        assert_eq!(stored.id, issued.id);
    }

    #[tokio::test]
    async fn test_pay_guards() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();

        // Double pay.
        service.pay(&opened.id, 0).await.unwrap();
        let err = service.pay(&opened.id, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "Order is already paid");

        // Cancelled order.
        let cancelled = service
            .create(&f.table_id, &f.staff_id, &[f.cola.clone()])
            .await
            .unwrap();
        service.cancel(&cancelled.id).await.unwrap();
        let err = service.pay(&cancelled.id, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot pay for a cancelled order");

        // Negative tip.
        let tipped = service
            .create(&f.table_id, &f.staff_id, &[f.cola.clone()])
            .await
            .unwrap();
        let err = service.pay(&tipped.id, -1).await.unwrap_err();
        assert_eq!(err.to_string(), "Tip amount cannot be negative");
    }

    #[tokio::test]
    async fn test_zero_total_order_cannot_be_paid() {
        let f = fixture().await;
        let service = f.db.order_service();

        let comped = service
            .create(&f.table_id, &f.staff_id, &[f.bread.clone()])
            .await
            .unwrap();

        let err = service.pay(&comped.id, 100).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot pay for an order with zero total amount"
        );

        // The guard must leave the order unpaid.
        let still_open = f.db.orders().get_by_id(&comped.id).await.unwrap().unwrap();
        assert_eq!(still_open.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_recomputes_occupancy() {
        let f = fixture().await;
        let service = f.db.order_service();

        let opened = service
            .create(&f.table_id, &f.staff_id, &[f.pizza.clone()])
            .await
            .unwrap();
        service.delete(&opened.id).await.unwrap();

        assert!(f.db.orders().get_by_id(&opened.id).await.unwrap().is_none());
        let table = f.db.tables().get_by_id(&f.table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
    }
}
