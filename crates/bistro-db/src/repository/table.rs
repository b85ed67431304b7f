//! # Dining Table Repository
//!
//! Database operations for dining tables.
//!
//! ## Shape Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How Shape Is Persisted                                  │
//! │                                                                         │
//! │  Shape::Rectangle { x, y, width, height }                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shape_kind='rectangle', x, y, width, height, radius=NULL              │
//! │                                                                         │
//! │  Shape::Circle { x, y, radius }                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shape_kind='circle', x, y, width=NULL, height=NULL, radius           │
//! │                                                                         │
//! │  Loading reverses the mapping; a row whose geometry columns don't      │
//! │  match its kind surfaces as DbError::CorruptRow.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::{DiningTable, OrderStatus, Shape, ShapeKind, TableStatus};

/// Flat row shape for the `dining_tables` table.
///
/// Geometry is stored in nullable columns; conversion to [`DiningTable`]
/// rebuilds the `Shape` sum type.
#[derive(Debug, sqlx::FromRow)]
struct TableRow {
    id: String,
    table_number: i64,
    floor: i64,
    shape_kind: ShapeKind,
    x: i64,
    y: i64,
    width: Option<i64>,
    height: Option<i64>,
    radius: Option<i64>,
    table_status: TableStatus,
    order_status: OrderStatus,
    assigned_staff_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TableRow> for DiningTable {
    type Error = DbError;

    fn try_from(row: TableRow) -> DbResult<DiningTable> {
        let shape = match row.shape_kind {
            ShapeKind::Rectangle => match (row.width, row.height) {
                (Some(width), Some(height)) => Shape::Rectangle {
                    x: row.x,
                    y: row.y,
                    width,
                    height,
                },
                _ => {
                    return Err(DbError::corrupt(
                        "dining_tables",
                        format!("rectangle {} is missing width/height", row.id),
                    ))
                }
            },
            ShapeKind::Circle => match row.radius {
                Some(radius) => Shape::Circle {
                    x: row.x,
                    y: row.y,
                    radius,
                },
                None => {
                    return Err(DbError::corrupt(
                        "dining_tables",
                        format!("circle {} is missing radius", row.id),
                    ))
                }
            },
        };

        Ok(DiningTable {
            id: row.id,
            table_number: row.table_number,
            floor: row.floor,
            shape,
            table_status: row.table_status,
            order_status: row.order_status,
            assigned_staff_id: row.assigned_staff_id,
            created_at: row.created_at,
        })
    }
}

/// Splits a shape into its storage columns: (width, height, radius).
fn geometry_columns(shape: &Shape) -> (Option<i64>, Option<i64>, Option<i64>) {
    match *shape {
        Shape::Rectangle { width, height, .. } => (Some(width), Some(height), None),
        Shape::Circle { radius, .. } => (None, None, Some(radius)),
    }
}

/// Returns the anchor coordinates of a shape: (x, y).
fn anchor(shape: &Shape) -> (i64, i64) {
    match *shape {
        Shape::Rectangle { x, y, .. } | Shape::Circle { x, y, .. } => (x, y),
    }
}

const SELECT_COLUMNS: &str = "id, table_number, floor, shape_kind, x, y, width, height, radius, \
     table_status, order_status, assigned_staff_id, created_at";

// =============================================================================
// Executor-Generic Queries
// =============================================================================
// Free functions so services can run them inside an open transaction.

/// Fetches a table by UUID.
pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: &str,
) -> DbResult<Option<DiningTable>> {
    let row: Option<TableRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM dining_tables WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(DiningTable::try_from).transpose()
}

/// Fetches a table by its business number.
pub async fn find_by_number(
    executor: impl SqliteExecutor<'_>,
    table_number: i64,
) -> DbResult<Option<DiningTable>> {
    let row: Option<TableRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM dining_tables WHERE table_number = ?1"
    ))
    .bind(table_number)
    .fetch_optional(executor)
    .await?;

    row.map(DiningTable::try_from).transpose()
}

/// Lists all tables ordered by table number.
pub async fn list_all(executor: impl SqliteExecutor<'_>) -> DbResult<Vec<DiningTable>> {
    let rows: Vec<TableRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM dining_tables ORDER BY table_number"
    ))
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(DiningTable::try_from).collect()
}

/// Lists tables on one floor. Placement checks only ever compare
/// same-floor tables, so this is the working set for overlap validation.
pub async fn list_by_floor(
    executor: impl SqliteExecutor<'_>,
    floor: i64,
) -> DbResult<Vec<DiningTable>> {
    let rows: Vec<TableRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM dining_tables WHERE floor = ?1 ORDER BY table_number"
    ))
    .bind(floor)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(DiningTable::try_from).collect()
}

/// Lists tables by occupancy status.
pub async fn list_by_status(
    executor: impl SqliteExecutor<'_>,
    status: TableStatus,
) -> DbResult<Vec<DiningTable>> {
    let rows: Vec<TableRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM dining_tables WHERE table_status = ?1 ORDER BY table_number"
    ))
    .bind(status)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(DiningTable::try_from).collect()
}

/// Inserts a table.
pub async fn insert(executor: impl SqliteExecutor<'_>, table: &DiningTable) -> DbResult<()> {
    debug!(id = %table.id, table_number = table.table_number, "Inserting table");

    let (width, height, radius) = geometry_columns(&table.shape);
    let (x, y) = anchor(&table.shape);

    sqlx::query(
        r#"
        INSERT INTO dining_tables (
            id, table_number, floor, shape_kind, x, y, width, height, radius,
            table_status, order_status, assigned_staff_id, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
    )
    .bind(&table.id)
    .bind(table.table_number)
    .bind(table.floor)
    .bind(table.shape.kind())
    .bind(x)
    .bind(y)
    .bind(width)
    .bind(height)
    .bind(radius)
    .bind(table.table_status)
    .bind(table.order_status)
    .bind(&table.assigned_staff_id)
    .bind(table.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Updates a table's number, floor and geometry.
pub async fn update(executor: impl SqliteExecutor<'_>, table: &DiningTable) -> DbResult<()> {
    debug!(id = %table.id, "Updating table");

    let (width, height, radius) = geometry_columns(&table.shape);
    let (x, y) = anchor(&table.shape);

    let result = sqlx::query(
        r#"
        UPDATE dining_tables SET
            table_number = ?2,
            floor = ?3,
            shape_kind = ?4,
            x = ?5,
            y = ?6,
            width = ?7,
            height = ?8,
            radius = ?9
        WHERE id = ?1
        "#,
    )
    .bind(&table.id)
    .bind(table.table_number)
    .bind(table.floor)
    .bind(table.shape.kind())
    .bind(x)
    .bind(y)
    .bind(width)
    .bind(height)
    .bind(radius)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Table", &table.id));
    }

    Ok(())
}

/// Writes a table's derived statuses.
pub async fn set_statuses(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    table_status: TableStatus,
    order_status: OrderStatus,
) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE dining_tables SET table_status = ?2, order_status = ?3 WHERE id = ?1",
    )
    .bind(id)
    .bind(table_status)
    .bind(order_status)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Table", id));
    }

    Ok(())
}

/// Writes only the occupancy status (reservation side effects).
pub async fn set_table_status(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    table_status: TableStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE dining_tables SET table_status = ?2 WHERE id = ?1")
        .bind(id)
        .bind(table_status)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Table", id));
    }

    Ok(())
}

/// Sets or clears the staff member assigned to a table.
pub async fn set_assigned_staff(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    staff_id: Option<&str>,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE dining_tables SET assigned_staff_id = ?2 WHERE id = ?1")
        .bind(id)
        .bind(staff_id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Table", id));
    }

    Ok(())
}

/// Deletes a table. Orders and reservations cascade.
pub async fn delete(executor: impl SqliteExecutor<'_>, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting table");

    let result = sqlx::query("DELETE FROM dining_tables WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Table", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for dining table database operations.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Gets a table by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<DiningTable>> {
        find_by_id(&self.pool, id).await
    }

    /// Gets a table by its business number.
    pub async fn get_by_number(&self, table_number: i64) -> DbResult<Option<DiningTable>> {
        find_by_number(&self.pool, table_number).await
    }

    /// Lists all tables.
    pub async fn list(&self) -> DbResult<Vec<DiningTable>> {
        list_all(&self.pool).await
    }

    /// Lists tables on one floor.
    pub async fn list_by_floor(&self, floor: i64) -> DbResult<Vec<DiningTable>> {
        list_by_floor(&self.pool, floor).await
    }

    /// Lists tables by occupancy status.
    pub async fn list_by_status(&self, status: TableStatus) -> DbResult<Vec<DiningTable>> {
        list_by_status(&self.pool, status).await
    }

    /// Counts tables (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_tables")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
