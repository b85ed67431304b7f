//! # Reservation Service
//!
//! Reservation scheduling: one table, one time slot, no double booking.
//!
//! ## Conflict Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update_times                                                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    table exists?                                                        │
//! │    load non-cancelled reservations of the table                        │
//! │    candidate interval overlaps any of them?  ← bistro-core::interval   │
//! │      yes → "Time conflict with existing reservation"                   │
//! │    INSERT / UPDATE                                                      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Intervals are half-open [start, end): a booking ending at 20:00 and   │
//! │  one starting at 20:00 do not conflict.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{reservation, table};
use crate::service::ServiceResult;
use bistro_core::interval::conflicts;
use bistro_core::validation::{validate_customer_name, validate_query_range};
use bistro_core::{CoreError, Reservation, ReservationStatus, TableStatus, TimeRange};

/// Service for reservation scheduling.
#[derive(Debug, Clone)]
pub struct ReservationService {
    pool: SqlitePool,
}

impl ReservationService {
    /// Creates a new ReservationService.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationService { pool }
    }

    /// Books a table for a time slot.
    ///
    /// ## Errors
    /// - `EndNotAfterStart` - malformed interval
    /// - `TableNotFound` - unknown table id
    /// - `ReservationConflict` - slot overlaps a non-cancelled reservation
    pub async fn create(
        &self,
        table_id: &str,
        customer_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Reservation> {
        self.create_with_status(table_id, customer_name, start, end, ReservationStatus::Pending)
            .await
    }

    /// Books a table for a time slot with an explicit initial status, for
    /// callers recording a booking that is already confirmed.
    ///
    /// Runs the same validation and conflict check as
    /// [`create`](Self::create); the status is stored as given, without
    /// the table-status side effect of [`confirm`](Self::confirm).
    pub async fn create_with_status(
        &self,
        table_id: &str,
        customer_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        initial_status: ReservationStatus,
    ) -> ServiceResult<Reservation> {
        validate_customer_name(customer_name)?;
        let candidate = TimeRange::new(start, end)?;

        let mut tx = self.pool.begin().await?;

        if table::find_by_id(&mut *tx, table_id).await?.is_none() {
            return Err(CoreError::TableNotFound(table_id.to_string()).into());
        }

        let existing = reservation::list_active_for_table(&mut *tx, table_id).await?;
        let taken = stored_ranges(&existing)?;

        if conflicts(&candidate, &taken) {
            return Err(CoreError::ReservationConflict.into());
        }

        let booked = Reservation {
            id: Uuid::new_v4().to_string(),
            table_id: table_id.to_string(),
            customer_name: customer_name.trim().to_string(),
            start_time: start,
            end_time: end,
            status: initial_status,
        };

        reservation::insert(&mut *tx, &booked).await?;
        tx.commit().await?;

        info!(id = %booked.id, table_id = %table_id, "Reservation created");
        Ok(booked)
    }

    /// Confirms a reservation and marks its table RESERVED.
    ///
    /// CANCELLED is terminal: a cancelled reservation cannot be
    /// resurrected. The table status write is otherwise unconditional:
    /// it does not check whether the confirmed slot is current or hours
    /// away.
    pub async fn confirm(&self, id: &str) -> ServiceResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let mut booked = reservation::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;
        if booked.status == ReservationStatus::Cancelled {
            return Err(CoreError::ReservationCancelled(id.to_string()).into());
        }

        reservation::set_status(&mut *tx, id, ReservationStatus::Confirmed).await?;
        table::set_table_status(&mut *tx, &booked.table_id, TableStatus::Reserved).await?;
        tx.commit().await?;

        booked.status = ReservationStatus::Confirmed;
        info!(id = %id, table_id = %booked.table_id, "Reservation confirmed");
        Ok(booked)
    }

    /// Cancels a reservation, releasing its slot, and marks the table
    /// AVAILABLE.
    ///
    /// Like [`confirm`](Self::confirm), the table status write is
    /// unconditional - it does not consult the table's other reservations
    /// or open orders.
    pub async fn cancel(&self, id: &str) -> ServiceResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let mut booked = reservation::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;
        if booked.status == ReservationStatus::Cancelled {
            return Err(CoreError::ReservationCancelled(id.to_string()).into());
        }

        reservation::set_status(&mut *tx, id, ReservationStatus::Cancelled).await?;
        table::set_table_status(&mut *tx, &booked.table_id, TableStatus::Available).await?;
        tx.commit().await?;

        booked.status = ReservationStatus::Cancelled;
        info!(id = %id, table_id = %booked.table_id, "Reservation cancelled");
        Ok(booked)
    }

    /// Moves a reservation to a new slot, re-running the full conflict
    /// check against the table's other non-cancelled reservations.
    pub async fn update_times(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Reservation> {
        let candidate = TimeRange::new(start, end)?;

        let mut tx = self.pool.begin().await?;

        let mut booked = reservation::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;

        let others: Vec<Reservation> =
            reservation::list_active_for_table(&mut *tx, &booked.table_id)
                .await?
                .into_iter()
                .filter(|r| r.id != id)
                .collect();
        let taken = stored_ranges(&others)?;

        if conflicts(&candidate, &taken) {
            return Err(CoreError::ReservationConflict.into());
        }

        reservation::set_times(&mut *tx, id, start, end).await?;
        tx.commit().await?;

        booked.start_time = start;
        booked.end_time = end;
        info!(id = %id, "Reservation rescheduled");
        Ok(booked)
    }

    /// Deletes a reservation outright and marks its table AVAILABLE, so a
    /// confirmed booking cannot leave the table stuck RESERVED after the
    /// record is gone.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let booked = reservation::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;

        reservation::delete(&mut *tx, id).await?;
        table::set_table_status(&mut *tx, &booked.table_id, TableStatus::Available).await?;
        tx.commit().await?;

        info!(id = %id, table_id = %booked.table_id, "Reservation deleted");
        Ok(())
    }

    /// Lists reservations starting inside `[start, end]`, rejecting an
    /// inverted range.
    pub async fn list_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Reservation>> {
        validate_query_range(start, end)?;
        Ok(reservation::list_starting_between(&self.pool, start, end).await?)
    }
}

/// Converts stored reservations to validated intervals.
///
/// Rows violating `end > start` can only come from edits outside the
/// application; they surface as corrupt rather than being skipped.
fn stored_ranges(reservations: &[Reservation]) -> Result<Vec<TimeRange>, DbError> {
    reservations
        .iter()
        .map(|r| {
            r.time_range()
                .map_err(|e| DbError::corrupt("reservations", format!("{}: {e}", r.id)))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bistro_core::Shape;
    use chrono::TimeZone;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_table(db: &Database) -> String {
        db.table_service()
            .create(1, 1, Shape::Rectangle { x: 0, y: 0, width: 100, height: 100 })
            .await
            .unwrap()
            .id
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, hour, min, 0).unwrap()
    }

    #[tokio::test]
    async fn test_overlapping_reservation_is_rejected() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();

        let err = service
            .create(&table_id, "Bob", at(19, 0), at(21, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Time conflict with existing reservation");
    }

    #[tokio::test]
    async fn test_back_to_back_reservations_are_accepted() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        service
            .create(&table_id, "Bob", at(20, 0), at(22, 0))
            .await
            .unwrap();

        let booked = db.reservations().list_by_table(&table_id).await.unwrap();
        assert_eq!(booked.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_slot_can_be_rebooked() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let first = service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        service.cancel(&first.id).await.unwrap();

        // Same slot again: the cancelled reservation no longer blocks it.
        service
            .create(&table_id, "Bob", at(18, 0), at(20, 0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_confirm_and_cancel_drive_table_status() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let booked = service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        assert_eq!(booked.status, ReservationStatus::Pending);

        service.confirm(&booked.id).await.unwrap();
        let table = db.tables().get_by_id(&table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Reserved);

        service.cancel(&booked.id).await.unwrap();
        let table = db.tables().get_by_id(&table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
    }

    #[tokio::test]
    async fn test_delete_frees_reserved_table() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let booked = service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        service.confirm(&booked.id).await.unwrap();
        let table = db.tables().get_by_id(&table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Reserved);

        service.delete(&booked.id).await.unwrap();

        assert!(db.reservations().get_by_id(&booked.id).await.unwrap().is_none());
        let table = db.tables().get_by_id(&table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
    }

    #[tokio::test]
    async fn test_cancelled_reservation_accepts_no_status_changes() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let booked = service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        service.cancel(&booked.id).await.unwrap();

        let err = service.confirm(&booked.id).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::ReservationCancelled(_))
        ));
        let err = service.cancel(&booked.id).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::ReservationCancelled(_))
        ));

        // The dead reservation did not flip the table back to RESERVED.
        let table = db.tables().get_by_id(&table_id).await.unwrap().unwrap();
        assert_eq!(table.table_status, TableStatus::Available);
        let stored = db.reservations().get_by_id(&booked.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_create_with_explicit_initial_status() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let booked = service
            .create_with_status(
                &table_id,
                "Alice",
                at(18, 0),
                at(20, 0),
                ReservationStatus::Confirmed,
            )
            .await
            .unwrap();
        assert_eq!(booked.status, ReservationStatus::Confirmed);

        let stored = db.reservations().get_by_id(&booked.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);

        // Conflict checking is identical to the plain create path.
        let err = service
            .create_with_status(
                &table_id,
                "Bob",
                at(19, 0),
                at(21, 0),
                ReservationStatus::Pending,
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Time conflict with existing reservation");
    }

    #[tokio::test]
    async fn test_reschedule_checks_conflicts_but_skips_self() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let first = service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        service
            .create(&table_id, "Bob", at(20, 0), at(22, 0))
            .await
            .unwrap();

        // Overlap with its own old slot is fine.
        service
            .update_times(&first.id, at(17, 0), at(19, 0))
            .await
            .unwrap();

        // Overlap with Bob's slot is not.
        let err = service
            .update_times(&first.id, at(19, 0), at(21, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::ReservationConflict)
        ));
    }

    #[tokio::test]
    async fn test_malformed_interval_and_missing_table() {
        let db = test_db().await;
        let table_id = seed_table(&db).await;
        let service = db.reservation_service();

        let err = service
            .create(&table_id, "Alice", at(20, 0), at(18, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "End time must be after start time");

        let err = service
            .create("nope", "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_starting_between_rejects_inverted_range() {
        let db = test_db().await;
        let service = db.reservation_service();

        let err = service
            .list_starting_between(at(20, 0), at(18, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Start date cannot be after the end date");

        let table_id = seed_table(&db).await;
        service
            .create(&table_id, "Alice", at(18, 0), at(20, 0))
            .await
            .unwrap();
        let hits = service
            .list_starting_between(at(17, 0), at(19, 0))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }
}
