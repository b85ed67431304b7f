//! # Table Occupancy Derivation
//!
//! The single source of truth for a table's derived occupancy state.
//!
//! ## Derivation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  compute_table_status(orders)                                       │
//! │                                                                     │
//! │  no orders ──────────────────────────────► AVAILABLE                │
//! │  all orders terminal (COMPLETED /                                   │
//! │    CANCELLED / PAID) ────────────────────► AVAILABLE                │
//! │  any order still open ───────────────────► OCCUPIED                 │
//! │                                                                     │
//! │  Called after EVERY order mutation (create, status change, cancel,  │
//! │  delete, pay) inside the same unit of work as the order write.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Historically each call site re-implemented this inline and the copies
//! drifted (one treated PAID as terminal, one did not). Centralizing the
//! rule keeps every mutation path consistent.

use crate::types::{Order, OrderStatus, TableStatus};

/// Derives a table's occupancy from the full set of its orders.
///
/// PAID counts as terminal everywhere: a table whose last order was just
/// paid frees up immediately.
pub fn compute_table_status(orders: &[Order]) -> TableStatus {
    if orders.iter().all(|order| order.status.is_terminal()) {
        TableStatus::Available
    } else {
        TableStatus::Occupied
    }
}

/// Derives the table's aggregate order-status mirror.
///
/// COMPLETED when every order is terminal, IN_PROGRESS while any order is
/// still open. Purely informational; occupancy decisions use
/// [`compute_table_status`].
pub fn aggregate_order_status(orders: &[Order]) -> OrderStatus {
    if orders.iter().all(|order| order.status.is_terminal()) {
        OrderStatus::Completed
    } else {
        OrderStatus::InProgress
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
