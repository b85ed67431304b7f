//! # Table Service
//!
//! Floor-plan table management: placement-validated create and update.
//!
//! ## Placement Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update                                                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    load every table on the target floor                                │
//! │    validate_placement(candidate, floor_tables)   ← bistro-core          │
//! │    INSERT or UPDATE                                                     │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Placement runs only here. Existing overlaps caused by data edited     │
//! │  outside the application are not re-checked on read.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::repository::table;
use crate::service::ServiceResult;
use bistro_core::validation::validate_table_number;
use bistro_core::{floor_plan, CoreError, DiningTable, OrderStatus, Shape, TableStatus};

/// Service for floor-plan table management.
#[derive(Debug, Clone)]
pub struct TableService {
    pool: SqlitePool,
}

impl TableService {
    /// Creates a new TableService.
    pub fn new(pool: SqlitePool) -> Self {
        TableService { pool }
    }

    /// Creates a table after validating its placement against every other
    /// table on the same floor.
    ///
    /// ## Errors
    /// - `TablePlacementConflict` - geometry overlaps an existing table
    /// - `MustBePositive` - non-positive table number
    pub async fn create(
        &self,
        table_number: i64,
        floor: i64,
        shape: Shape,
    ) -> ServiceResult<DiningTable> {
        validate_table_number(table_number)?;

        let mut tx = self.pool.begin().await?;

        let floor_tables = table::list_by_floor(&mut *tx, floor).await?;

        let candidate = DiningTable {
            id: Uuid::new_v4().to_string(),
            table_number,
            floor,
            shape,
            table_status: TableStatus::Available,
            order_status: OrderStatus::Completed,
            assigned_staff_id: None,
            created_at: Utc::now(),
        };

        floor_plan::validate_placement(&candidate, &floor_tables)?;

        table::insert(&mut *tx, &candidate).await?;
        tx.commit().await?;

        info!(
            id = %candidate.id,
            table_number = table_number,
            floor = floor,
            "Table created"
        );
        Ok(candidate)
    }

    /// Updates a table's number, floor or geometry, re-validating placement
    /// against the (possibly new) floor.
    ///
    /// The table's own previous footprint is excluded from the check, so
    /// nudging a table within its old outline is legal.
    pub async fn update(
        &self,
        id: &str,
        table_number: i64,
        floor: i64,
        shape: Shape,
    ) -> ServiceResult<DiningTable> {
        validate_table_number(table_number)?;

        let mut tx = self.pool.begin().await?;

        let mut current = table::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::TableNotFound(id.to_string()))?;

        current.table_number = table_number;
        current.floor = floor;
        current.shape = shape;

        let floor_tables = table::list_by_floor(&mut *tx, floor).await?;
        floor_plan::validate_placement(&current, &floor_tables)?;

        table::update(&mut *tx, &current).await?;
        tx.commit().await?;

        info!(id = %id, floor = floor, "Table updated");
        Ok(current)
    }

    /// Deletes a table. Its orders and reservations cascade away.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        if table::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::TableNotFound(id.to_string()).into());
        }

        table::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(id = %id, "Table deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::service::ServiceError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn rect(x: i64, y: i64, width: i64, height: i64) -> Shape {
        Shape::Rectangle { x, y, width, height }
    }

    #[tokio::test]
    async fn test_create_and_fetch_table() {
        let db = test_db().await;

        let created = db
            .table_service()
            .create(7, 1, rect(0, 0, 100, 100))
            .await
            .unwrap();

        let fetched = db.tables().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.table_number, 7);
        assert_eq!(fetched.table_status, TableStatus::Available);

        let by_number = db.tables().get_by_number(7).await.unwrap().unwrap();
        assert_eq!(by_number.id, created.id);
    }

    #[tokio::test]
    async fn test_overlapping_placement_is_rejected() {
        let db = test_db().await;
        let service = db.table_service();

        service.create(1, 1, rect(0, 0, 100, 100)).await.unwrap();

        let err = service
            .create(2, 1, rect(50, 50, 100, 100))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(CoreError::TablePlacementConflict)
        ));
        assert_eq!(
            err.to_string(),
            "Table placement is invalid: overlaps with another table"
        );
    }

    #[tokio::test]
    async fn test_back_to_back_and_cross_floor_placements_are_legal() {
        let db = test_db().await;
        let service = db.table_service();

        service.create(1, 1, rect(0, 0, 100, 100)).await.unwrap();
        // Shares the x=100 edge on the same floor.
        service.create(2, 1, rect(100, 0, 100, 100)).await.unwrap();
        // Same footprint as table 1, but a different floor.
        service.create(3, 2, rect(0, 0, 100, 100)).await.unwrap();

        assert_eq!(db.tables().list_by_floor(1).await.unwrap().len(), 2);
        assert_eq!(db.tables().list_by_floor(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_revalidates_placement() {
        let db = test_db().await;
        let service = db.table_service();

        service.create(1, 1, rect(0, 0, 100, 100)).await.unwrap();
        let t2 = service.create(2, 1, rect(200, 0, 100, 100)).await.unwrap();

        // Moving table 2 onto table 1 must fail.
        let err = service
            .update(&t2.id, 2, 1, rect(50, 0, 100, 100))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::TablePlacementConflict)
        ));

        // Nudging table 2 inside its own old footprint is fine.
        let moved = service
            .update(&t2.id, 2, 1, rect(210, 0, 100, 100))
            .await
            .unwrap();
        assert_eq!(moved.shape, rect(210, 0, 100, 100));
    }

    #[tokio::test]
    async fn test_mixed_shape_overlap_detected_through_storage() {
        let db = test_db().await;
        let service = db.table_service();

        service.create(1, 1, rect(0, 0, 100, 100)).await.unwrap();

        let err = service
            .create(2, 1, Shape::Circle { x: 110, y: 50, radius: 20 })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::TablePlacementConflict)
        ));

        // Tangent circle (distance equals radius) does not overlap.
        service
            .create(2, 1, Shape::Circle { x: 120, y: 50, radius: 20 })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_table_number_is_rejected_by_storage() {
        let db = test_db().await;
        let service = db.table_service();

        service.create(1, 1, rect(0, 0, 50, 50)).await.unwrap();
        let err = service.create(1, 2, rect(0, 0, 50, 50)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_table() {
        let db = test_db().await;
        let err = db.table_service().delete("nope").await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn test_non_positive_table_number_is_rejected() {
        let db = test_db().await;
        let err = db
            .table_service()
            .create(0, 1, rect(0, 0, 50, 50))
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::Validation(_))));
    }
}
