//! # bistro-core: Pure Business Logic for Bistro RMS
//!
//! This crate is the **heart** of Bistro RMS. It contains all consistency
//! decisions as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro RMS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Service Layer (bistro-db)                    │   │
//! │  │   TableService ─ ReservationService ─ OrderService ─ Receipts  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ loads state, calls down               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ interval  │  │ geometry  │  │ occupancy │  │  payment  │  │   │
//! │  │   │ TimeRange │  │   Shape   │  │  derive   │  │  totals   │  │   │
//! │  │   │ conflicts │  │  overlap  │  │  status   │  │   Money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK READS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DiningTable, Order, Reservation, Shift, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types with exact caller-facing messages
//! - [`interval`] - Half-open time ranges and conflict detection
//! - [`geometry`] - Table shapes and overlap tests (integer math only)
//! - [`floor_plan`] - Placement validation against a floor's tables
//! - [`occupancy`] - Derived table occupancy from order state
//! - [`payment`] - Receipt total calculation
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Integer Geometry**: Overlap tests compare squared distances, never floats
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::interval::{conflicts, TimeRange};
//! use chrono::{TimeZone, Utc};
//!
//! let existing = TimeRange::new(
//!     Utc.with_ymd_and_hms(2026, 6, 10, 18, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 6, 10, 20, 0, 0).unwrap(),
//! ).unwrap();
//!
//! // Back-to-back bookings share an endpoint and do NOT conflict.
//! let candidate = TimeRange::new(
//!     Utc.with_ymd_and_hms(2026, 6, 10, 20, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 6, 10, 22, 0, 0).unwrap(),
//! ).unwrap();
//!
//! assert!(!conflicts(&candidate, &[existing]));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod floor_plan;
pub mod geometry;
pub mod interval;
pub mod money;
pub mod occupancy;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`

pub use error::{CoreError, CoreResult, ErrorCategory, ValidationError};
pub use geometry::{Shape, ShapeKind};
pub use interval::TimeRange;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a staff shift, in minutes.
///
/// ## Business Reason
/// Shorter blocks are scheduling noise rather than real shifts. A candidate
/// shift of 59 minutes is rejected before any conflict check runs.
pub const MIN_SHIFT_MINUTES: i64 = 60;
