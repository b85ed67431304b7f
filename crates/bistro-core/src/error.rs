//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Categories                            │
//! │                                                                     │
//! │  NotFound      referenced entity id does not exist                  │
//! │  Validation    malformed input (end <= start, negative tip, ...)    │
//! │  Conflict      well-formed input incompatible with existing state   │
//! │                (overlapping reservation/shift/table geometry)       │
//! │  IllegalState  mutating a terminal order, double-paying, ...        │
//! │                                                                     │
//! │  Every error is terminal for the operation: the caller's            │
//! │  transaction rolls back and no partial state is written.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity ids, statuses)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a stable user-facing message

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Error Category
// =============================================================================

/// Coarse classification of a [`CoreError`].
///
/// Request handlers map these to transport-level responses (404 / 400 /
/// 409 / 422); the core only decides which bucket an error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Conflict,
    IllegalState,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or domain logic failures and
/// are surfaced to the caller unchanged; the core never retries.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced table id does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Referenced staff id does not exist.
    #[error("Staff not found: {0}")]
    StaffNotFound(String),

    /// Referenced order id does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Referenced menu item id does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Referenced reservation id does not exist.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Referenced shift id does not exist.
    #[error("Shift not found: {0}")]
    ShiftNotFound(String),

    /// Referenced receipt id does not exist.
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),

    /// The candidate interval overlaps a non-cancelled reservation on the
    /// same table.
    #[error("Time conflict with existing reservation")]
    ReservationConflict,

    /// The candidate interval overlaps another shift of the same staff
    /// member.
    #[error("Staff already has a shift during this time")]
    ShiftConflict,

    /// The candidate table geometry overlaps an existing table on the same
    /// floor.
    #[error("Table placement is invalid: overlaps with another table")]
    TablePlacementConflict,

    /// Items cannot be added to or removed from an order in a terminal
    /// status.
    #[error("Order {order_id} is {status:?}, items can no longer be modified")]
    OrderNotEditable {
        order_id: String,
        status: OrderStatus,
    },

    /// The requested status change is not permitted by the order state
    /// machine.
    #[error("Order {order_id} cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// A cancelled reservation accepts no further status changes.
    #[error("Reservation {0} is cancelled and can no longer change status")]
    ReservationCancelled(String),

    /// Paying a cancelled order is rejected.
    #[error("Cannot pay for a cancelled order")]
    OrderCancelled,

    /// Paying an order that already has a receipt is rejected.
    #[error("Order is already paid")]
    OrderAlreadyPaid,

    /// An order whose items sum to zero (or less) cannot be paid.
    #[error("Cannot pay for an order with zero total amount")]
    ZeroOrderTotal,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::TableNotFound(_)
            | CoreError::StaffNotFound(_)
            | CoreError::OrderNotFound(_)
            | CoreError::ItemNotFound(_)
            | CoreError::ReservationNotFound(_)
            | CoreError::ShiftNotFound(_)
            | CoreError::ReceiptNotFound(_) => ErrorCategory::NotFound,

            CoreError::ReservationConflict
            | CoreError::ShiftConflict
            | CoreError::TablePlacementConflict => ErrorCategory::Conflict,

            CoreError::OrderNotEditable { .. }
            | CoreError::InvalidStatusTransition { .. }
            | CoreError::ReservationCancelled(_)
            | CoreError::OrderCancelled
            | CoreError::OrderAlreadyPaid
            | CoreError::ZeroOrderTotal => ErrorCategory::IllegalState,

            CoreError::Validation(_) => ErrorCategory::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input is malformed before any state is consulted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Interval end is not strictly after its start.
    #[error("End time must be after start time")]
    EndNotAfterStart,

    /// Shift duration is below the one-hour floor.
    #[error("Shift must be at least 1 hour long")]
    ShiftTooShort,

    /// A query date range runs backwards.
    #[error("Start date cannot be after the end date")]
    InvertedDateRange,

    /// Tip amounts must be zero or positive.
    #[error("Tip amount cannot be negative")]
    NegativeTip,

    /// An order needs at least one resolvable item.
    #[error("No valid items found for the order")]
    NoItems,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ReservationConflict.to_string(),
            "Time conflict with existing reservation"
        );
        assert_eq!(
            CoreError::ShiftConflict.to_string(),
            "Staff already has a shift during this time"
        );
        assert_eq!(CoreError::OrderAlreadyPaid.to_string(), "Order is already paid");
        assert_eq!(
            CoreError::OrderCancelled.to_string(),
            "Cannot pay for a cancelled order"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::EndNotAfterStart.to_string(),
            "End time must be after start time"
        );
        assert_eq!(
            ValidationError::ShiftTooShort.to_string(),
            "Shift must be at least 1 hour long"
        );
        assert_eq!(
            ValidationError::NoItems.to_string(),
            "No valid items found for the order"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NegativeTip.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            CoreError::TableNotFound("t1".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            CoreError::TablePlacementConflict.category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            CoreError::OrderAlreadyPaid.category(),
            ErrorCategory::IllegalState
        );
        assert_eq!(
            CoreError::ReservationCancelled("r1".into()).category(),
            ErrorCategory::IllegalState
        );
    }
}
