//! # bistro-db: Database Layer for Bistro RMS
//!
//! This crate provides SQLite persistence and the orchestrating services
//! for the Bistro restaurant management system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro RMS Data Flow                             │
//! │                                                                         │
//! │  Caller (API layer, seed binary, tests)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Services    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (transactions │───►│  (queries)    │    │  (embedded)  │  │   │
//! │  │   │  + decisions  │    │               │    │              │  │   │
//! │  │   │  from core)   │    │ TableRepo ... │    │ 001_init.sql │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                    │   │
//! │  │           ▼                                                    │   │
//! │  │   bistro-core: conflicts? placement ok? totals? occupancy?    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │              WAL mode, foreign keys enforced                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Per-entity query access
//! - [`service`] - Transactional orchestration (schedulers, lifecycle, pay)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/bistro.db")).await?;
//!
//! let table = db.table_service()
//!     .create(1, 1, Shape::Rectangle { x: 0, y: 0, width: 100, height: 100 })
//!     .await?;
//! let reservation = db.reservation_service()
//!     .create(&table.id, "Alice", start, end)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{ServiceError, ServiceResult};

// Repository re-exports for convenience
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use repository::receipt::ReceiptRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::shift::ShiftRepository;
pub use repository::staff::StaffRepository;
pub use repository::table::TableRepository;

// Service re-exports
pub use service::item::ItemService;
pub use service::order::OrderService;
pub use service::receipt::ReceiptService;
pub use service::reservation::ReservationService;
pub use service::shift::ShiftService;
pub use service::staff::StaffService;
pub use service::table::TableService;
