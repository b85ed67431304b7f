//! # Service Module
//!
//! Orchestrating services for Bistro RMS.
//!
//! ## Service Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Decisions Are Made                             │
//! │                                                                         │
//! │  Service (this module)                                                 │
//! │  ├── opens ONE transaction per operation                               │
//! │  ├── loads the relevant state through the repositories                 │
//! │  ├── calls bistro-core for the decision (conflict? placement ok?       │
//! │  │   transition legal? totals?)                                        │
//! │  └── writes the outcome and commits - or returns the error and         │
//! │      rolls back                                                        │
//! │                                                                         │
//! │  The check and the write share the transaction, so two concurrent     │
//! │  creations cannot both pass the conflict check and both insert.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Services
//!
//! - [`table::TableService`] - Floor-plan placement
//! - [`staff::StaffService`] - Staff CRUD
//! - [`item::ItemService`] - Menu item CRUD
//! - [`reservation::ReservationService`] - Reservation scheduling
//! - [`shift::ShiftService`] - Shift scheduling
//! - [`order::OrderService`] - Order lifecycle and the pay path
//! - [`receipt::ReceiptService`] - Receipt issuing and queries

use thiserror::Error;

use crate::error::DbError;
use bistro_core::{CoreError, ValidationError};

pub mod item;
pub mod order;
pub mod receipt;
pub mod reservation;
pub mod shift;
pub mod staff;
pub mod table;

// =============================================================================
// Service Error
// =============================================================================

/// Errors surfaced by service operations.
///
/// Domain errors carry the stable caller-facing messages from
/// [`bistro_core::CoreError`]; database errors indicate infrastructure
/// problems. Either way the operation's transaction has rolled back.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The database failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Domain(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Db(DbError::from(err))
    }
}

impl ServiceError {
    /// Returns the domain error, if this is one. Test helper friendly.
    pub fn as_domain(&self) -> Option<&CoreError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            ServiceError::Db(_) => None,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
