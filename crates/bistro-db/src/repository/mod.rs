//! # Repository Module
//!
//! Database repository implementations for Bistro RMS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service / caller                                                      │
//! │       │                                                                 │
//! │       │  db.reservations().list_by_table(table_id)                      │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ReservationRepository                                                 │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_by_table(&self, table_id)                                    │
//! │  └── ...                                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Layers Per Module
//!
//! Each repository module exposes the same queries twice:
//! - module-level functions generic over `impl SqliteExecutor<'_>`, so a
//!   service can run them against an open transaction;
//! - a `*Repository` struct bound to the pool for plain one-shot access.
//!
//! The struct methods delegate to the functions, so every query has a
//! single definition.
//!
//! ## Available Repositories
//!
//! - [`table::TableRepository`] - Dining tables and floor-plan geometry
//! - [`staff::StaffRepository`] - Staff members
//! - [`item::ItemRepository`] - Menu items
//! - [`order::OrderRepository`] - Orders and their item join rows
//! - [`reservation::ReservationRepository`] - Reservations
//! - [`shift::ShiftRepository`] - Staff shifts
//! - [`receipt::ReceiptRepository`] - Receipts

pub mod item;
pub mod order;
pub mod receipt;
pub mod reservation;
pub mod shift;
pub mod staff;
pub mod table;
