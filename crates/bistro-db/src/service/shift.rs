//! # Shift Service
//!
//! Shift scheduling: one staff member cannot hold two overlapping shifts,
//! and every shift is at least one hour long.
//!
//! Overlap uses the same half-open interval rule as reservations, so a
//! closing shift ending at 17:00 and an evening shift starting at 17:00
//! coexist.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{shift, staff};
use crate::service::ServiceResult;
use bistro_core::interval::conflicts;
use bistro_core::validation::{validate_query_range, validate_shift_range};
use bistro_core::{CoreError, Shift, TimeRange};

/// Service for shift scheduling.
#[derive(Debug, Clone)]
pub struct ShiftService {
    pool: SqlitePool,
}

impl ShiftService {
    /// Creates a new ShiftService.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftService { pool }
    }

    /// Schedules a shift for a staff member.
    ///
    /// ## Errors
    /// - `EndNotAfterStart` - malformed interval
    /// - `ShiftTooShort` - shorter than one hour
    /// - `StaffNotFound` - unknown staff id
    /// - `ShiftConflict` - overlaps one of the member's other shifts
    pub async fn create(
        &self,
        staff_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Shift> {
        let candidate = validate_shift_range(start, end)?;

        let mut tx = self.pool.begin().await?;

        if staff::find_by_id(&mut *tx, staff_id).await?.is_none() {
            return Err(CoreError::StaffNotFound(staff_id.to_string()).into());
        }

        let existing = shift::list_by_staff(&mut *tx, staff_id).await?;
        let taken = stored_ranges(&existing)?;

        if conflicts(&candidate, &taken) {
            return Err(CoreError::ShiftConflict.into());
        }

        let scheduled = Shift {
            id: Uuid::new_v4().to_string(),
            staff_id: staff_id.to_string(),
            start_time: start,
            end_time: end,
        };

        shift::insert(&mut *tx, &scheduled).await?;
        tx.commit().await?;

        info!(id = %scheduled.id, staff_id = %staff_id, "Shift scheduled");
        Ok(scheduled)
    }

    /// Moves a shift, re-running the full validation set: well-formed
    /// interval, one-hour minimum, and overlap against the staff member's
    /// other shifts.
    pub async fn update_times(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Shift> {
        let candidate = validate_shift_range(start, end)?;

        let mut tx = self.pool.begin().await?;

        let mut scheduled = shift::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::ShiftNotFound(id.to_string()))?;

        let others: Vec<Shift> = shift::list_by_staff(&mut *tx, &scheduled.staff_id)
            .await?
            .into_iter()
            .filter(|s| s.id != id)
            .collect();
        let taken = stored_ranges(&others)?;

        if conflicts(&candidate, &taken) {
            return Err(CoreError::ShiftConflict.into());
        }

        shift::set_times(&mut *tx, id, start, end).await?;
        tx.commit().await?;

        scheduled.start_time = start;
        scheduled.end_time = end;
        info!(id = %id, "Shift rescheduled");
        Ok(scheduled)
    }

    /// Deletes a shift.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        if shift::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::ShiftNotFound(id.to_string()).into());
        }

        shift::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(id = %id, "Shift deleted");
        Ok(())
    }

    /// Lists shifts starting inside `[start, end]`, rejecting an inverted
    /// range.
    pub async fn list_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Shift>> {
        validate_query_range(start, end)?;
        Ok(shift::list_starting_between(&self.pool, start, end).await?)
    }
}

/// Converts stored shifts to validated intervals.
fn stored_ranges(shifts: &[Shift]) -> Result<Vec<TimeRange>, DbError> {
    shifts
        .iter()
        .map(|s| {
            s.time_range()
                .map_err(|e| DbError::corrupt("shifts", format!("{}: {e}", s.id)))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
