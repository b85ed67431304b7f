//! # Staff Service
//!
//! Minimal staff CRUD: the schedulers and the order path need staff rows
//! to reference, nothing more.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::repository::staff;
use crate::service::ServiceResult;
use bistro_core::validation::validate_staff_name;
use bistro_core::{CoreError, Staff, StaffRole};

/// Service for staff management.
#[derive(Debug, Clone)]
pub struct StaffService {
    pool: SqlitePool,
}

impl StaffService {
    /// Creates a new StaffService.
    pub fn new(pool: SqlitePool) -> Self {
        StaffService { pool }
    }

    /// Creates a staff member.
    pub async fn create(&self, name: &str, role: StaffRole) -> ServiceResult<Staff> {
        validate_staff_name(name)?;

        let member = Staff {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            role,
            created_at: Utc::now(),
        };

        staff::insert(&self.pool, &member).await?;

        info!(id = %member.id, name = %member.name, "Staff member created");
        Ok(member)
    }

    /// Deletes a staff member. Their shifts cascade away.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        if staff::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::StaffNotFound(id.to_string()).into());
        }

        staff::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(id = %id, "Staff member deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
