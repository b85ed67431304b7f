//! # Menu Item Service
//!
//! Menu item CRUD. Items are never hard-deleted; `set_available(false)`
//! retires them while historical orders keep their join rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::repository::item;
use crate::service::ServiceResult;
use bistro_core::validation::{validate_item_name, validate_price_cents};
use bistro_core::{CoreError, Item};

/// Service for menu item management.
#[derive(Debug, Clone)]
pub struct ItemService {
    pool: SqlitePool,
}

impl ItemService {
    /// Creates a new ItemService.
    pub fn new(pool: SqlitePool) -> Self {
        ItemService { pool }
    }

    /// Creates a menu item.
    ///
    /// A zero price is legal (complimentary items); negative prices are
    /// rejected.
    pub async fn create(&self, name: &str, price_cents: i64) -> ServiceResult<Item> {
        validate_item_name(name)?;
        validate_price_cents(price_cents)?;

        let new_item = Item {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price_cents,
            available: true,
            created_at: Utc::now(),
        };

        item::insert(&self.pool, &new_item).await?;

        info!(id = %new_item.id, name = %new_item.name, "Item created");
        Ok(new_item)
    }

    /// Sets an item's availability flag.
    pub async fn set_available(&self, id: &str, available: bool) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        if item::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::ItemNotFound(id.to_string()).into());
        }

        item::set_available(&mut *tx, id, available).await?;
        tx.commit().await?;

        info!(id = %id, available = available, "Item availability changed");
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_retire_item() {
        let db = test_db().await;
        let service = db.item_service();

        let pizza = service.create("Margherita", 1250).await.unwrap();
        assert!(pizza.available);

        service.set_available(&pizza.id, false).await.unwrap();
        let fetched = db.items().get_by_id(&pizza.id).await.unwrap().unwrap();
        assert!(!fetched.available);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let db = test_db().await;
        let err = db.item_service().create("Oops", -100).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_available_on_missing_item() {
        let db = test_db().await;
        let err = db
            .item_service()
            .set_available("nope", false)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(CoreError::ItemNotFound(_))));
    }
}
