//! # Floor-Plan Placement Validation
//!
//! Accepts or rejects a table placement against every existing table on
//! the same floor.
//!
//! ## Placement Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  validate_placement(candidate, existing)                            │
//! │                                                                     │
//! │  for each existing table:                                           │
//! │    ├── different floor?  skip (floors are independent spaces)       │
//! │    ├── same id?          skip (a table never conflicts with its     │
//! │    │                     own previous position on update)           │
//! │    └── shapes overlap?   reject                                     │
//! │                                                                     │
//! │  Runs once at table create and once at table update; placement is   │
//! │  not re-validated continuously.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::DiningTable;

/// Validates that the candidate table does not overlap any existing table
/// on its floor.
///
/// The first conflict found rejects the placement; cross-floor overlap is
/// permitted.
pub fn validate_placement(candidate: &DiningTable, existing: &[DiningTable]) -> CoreResult<()> {
    for table in existing {
        if table.id == candidate.id || table.floor != candidate.floor {
            continue;
        }
        if candidate.shape.overlaps(&table.shape) {
            return Err(CoreError::TablePlacementConflict);
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::types::{OrderStatus, TableStatus};
    use chrono::Utc;

    fn table(id: &str, floor: i64, shape: Shape) -> DiningTable {
        DiningTable {
            id: id.to_string(),
            table_number: 1,
            floor,
            shape,
            table_status: TableStatus::Available,
            order_status: OrderStatus::Completed,
            assigned_staff_id: None,
            created_at: Utc::now(),
        }
    }

    fn rect(x: i64, y: i64, width: i64, height: i64) -> Shape {
        Shape::Rectangle { x, y, width, height }
    }

    #[test]
    fn test_accepts_empty_floor() {
        let candidate = table("t1", 1, rect(0, 0, 100, 100));
        assert!(validate_placement(&candidate, &[]).is_ok());
    }

    #[test]
    fn test_rejects_overlap_on_same_floor() {
        let candidate = table("t2", 1, rect(50, 50, 100, 100));
        let existing = [table("t1", 1, rect(0, 0, 100, 100))];
        assert!(matches!(
            validate_placement(&candidate, &existing),
            Err(CoreError::TablePlacementConflict)
        ));
    }

    #[test]
    fn test_cross_floor_overlap_is_permitted() {
        let candidate = table("t2", 2, rect(50, 50, 100, 100));
        let existing = [table("t1", 1, rect(0, 0, 100, 100))];
        assert!(validate_placement(&candidate, &existing).is_ok());
    }

    #[test]
    fn test_update_skips_own_previous_position() {
        // Moving a table slightly still intersects its old footprint; it
        // must not conflict with itself.
        let candidate = table("t1", 1, rect(10, 10, 100, 100));
        let existing = [table("t1", 1, rect(0, 0, 100, 100))];
        assert!(validate_placement(&candidate, &existing).is_ok());
    }

    #[test]
    fn test_back_to_back_tables_are_legal() {
        let candidate = table("t2", 1, rect(100, 0, 100, 100));
        let existing = [table("t1", 1, rect(0, 0, 100, 100))];
        assert!(validate_placement(&candidate, &existing).is_ok());
    }

    #[test]
    fn test_mixed_shapes() {
        let candidate = table("t2", 1, Shape::Circle { x: 110, y: 50, radius: 20 });
        let existing = [table("t1", 1, rect(0, 0, 100, 100))];
        assert!(validate_placement(&candidate, &existing).is_err());
    }
}
