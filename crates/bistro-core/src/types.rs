//! # Domain Types
//!
//! Core domain types for Bistro RMS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │  DiningTable  │   │     Order     │   │  Reservation  │          │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │          │
//! │  │  id (UUID)    │   │  id (UUID)    │   │  id (UUID)    │          │
//! │  │  table_number │   │  table_id     │   │  table_id     │          │
//! │  │  floor/shape  │   │  staff_id     │   │  start/end    │          │
//! │  │  table_status │   │  status       │   │  status       │          │
//! │  └───────────────┘   └───────────────┘   └───────────────┘          │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │     Staff     │   │     Shift     │   │    Receipt    │          │
//! │  │  id / role    │   │  staff_id     │   │  order_id 1:1 │          │
//! │  └───────────────┘   │  start/end    │   │  totals       │          │
//! │                      └───────────────┘   └───────────────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Tables carry both a UUID `id` (immutable, used for relations) and a
//! human-readable `table_number` business key.
//!
//! Statuses, roles and shapes are closed enums: every branch over them is
//! an exhaustive match, checked at compile time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geometry::Shape;
use crate::interval::TimeRange;
use crate::money::Money;

// =============================================================================
// Table Status
// =============================================================================

/// Occupancy state of a dining table.
///
/// OCCUPIED and AVAILABLE are derived from the table's orders (see
/// [`crate::occupancy`]); RESERVED is set when a reservation is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

impl Default for TableStatus {
    fn default() -> Self {
        TableStatus::Available
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order taken, kitchen not started.
    Pending,
    /// Kitchen is working on it.
    InProgress,
    /// Food delivered; order may still be cancelled or paid.
    Completed,
    /// Order was cancelled (terminal).
    Cancelled,
    /// Order was paid and has a receipt (terminal).
    Paid,
}

impl OrderStatus {
    /// Terminal statuses no longer hold a table: COMPLETED, CANCELLED and
    /// PAID all count when deriving table availability.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Paid
        )
    }

    /// Whether items may still be added to or removed from the order.
    #[inline]
    pub const fn allows_item_changes(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::InProgress)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// CANCELLED and PAID accept no further transitions; COMPLETED may
    /// still be cancelled or paid.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending | OrderStatus::InProgress => true,
            OrderStatus::Completed => {
                matches!(next, OrderStatus::Cancelled | OrderStatus::Paid)
            }
            OrderStatus::Cancelled | OrderStatus::Paid => false,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Reservation Status
// =============================================================================

/// The status of a reservation. No transition leaves CANCELLED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Active reservations block their time slot; cancelled ones do not.
    #[inline]
    pub const fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

// =============================================================================
// Staff Role
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Waiter,
    Chef,
    Manager,
}

// =============================================================================
// Dining Table
// =============================================================================

/// A physical table on the restaurant floor plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable table number - business identifier, unique.
    pub table_number: i64,

    /// Floor the table stands on. Floors are independent coordinate
    /// spaces; only same-floor tables are compared for overlap.
    pub floor: i64,

    /// Footprint on the floor plan.
    pub shape: Shape,

    /// Occupancy state, derived from orders and reservations.
    pub table_status: TableStatus,

    /// Aggregate mirror of the table's order activity.
    pub order_status: OrderStatus,

    /// Staff member currently serving this table, if any. Cleared when
    /// the table's last open order is paid.
    pub assigned_staff_id: Option<String>,

    /// When the table was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Staff
// =============================================================================

/// A staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A menu item that can appear on orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
    /// Whether the item is currently orderable (soft delete).
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed at a table.
///
/// The owning table is set at creation and never changes. Items live in
/// the `order_items` join table and are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub staff_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reservation
// =============================================================================

/// A reservation of one table for a time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: String,
    pub table_id: String,
    pub customer_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl Reservation {
    /// The reserved slot as a validated half-open interval.
    ///
    /// Stored reservations satisfy `end > start` by construction; an Err
    /// here means the row was corrupted outside the application.
    pub fn time_range(&self) -> Result<TimeRange, ValidationError> {
        TimeRange::new(self.start_time, self.end_time)
    }
}

// =============================================================================
// Shift
// =============================================================================

/// A work shift of one staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: String,
    pub staff_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Shift {
    /// The shift as a validated half-open interval.
    pub fn time_range(&self) -> Result<TimeRange, ValidationError> {
        TimeRange::new(self.start_time, self.end_time)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A receipt issued for an order (one-to-one, created once).
///
/// Immutable after creation: totals are frozen at payment time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: String,
    pub order_id: String,
    pub issued_at: DateTime<Utc>,
    /// Sum of item prices at payment time.
    pub total_cents: i64,
    /// Tip on top of the total (>= 0).
    pub tip_cents: i64,
    /// total + tip.
    pub final_cents: i64,
}

impl Receipt {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn tip(&self) -> Money {
        Money::from_cents(self.tip_cents)
    }

    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_terminality() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
    }

    #[test]
    fn test_item_changes_allowed_only_before_completion() {
        assert!(OrderStatus::Pending.allows_item_changes());
        assert!(OrderStatus::InProgress.allows_item_changes());
        assert!(!OrderStatus::Completed.allows_item_changes());
        assert!(!OrderStatus::Cancelled.allows_item_changes());
        assert!(!OrderStatus::Paid.allows_item_changes());
    }

    #[test]
    fn test_completed_may_only_cancel_or_pay() {
        assert!(OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Completed.can_transition_to(OrderStatus::Paid));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::InProgress));
    }

    #[test]
    fn test_terminal_statuses_accept_no_transition() {
        for next in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Paid,
        ] {
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
            assert!(!OrderStatus::Paid.can_transition_to(next));
        }
    }

    #[test]
    fn test_reservation_activity() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TableStatus::default(), TableStatus::Available);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
    }
}
