//! Repository for the `vendors` table.

use sqlx::PgPool;
use veriscore_core::types::DbId;

use crate::models::vendor::Vendor;

/// Column list for `vendors` SELECT queries.
const COLUMNS: &str = "\
    id, name, description, cost_per_record, quality_score, \
    coverage_percentage, is_active, created_at, updated_at";

/// Provides query operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// Find a vendor by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vendors in id order, optionally restricted to active ones.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        active_only: bool,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let filter = if active_only {
            "WHERE is_active = TRUE"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM vendors {filter} ORDER BY id OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List all active vendors in id order (benchmark/population queries).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendors WHERE is_active = TRUE ORDER BY id"
        );
        sqlx::query_as::<_, Vendor>(&query).fetch_all(pool).await
    }

    /// Number of vendor rows (used to decide whether to seed).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
            .fetch_one(pool)
            .await
    }

    /// Refresh the cached composite score on the vendor row.
    ///
    /// This is the scoring engine's cache-update step; the `quality_drop`
    /// alert reads this column.
    pub async fn update_quality_score(
        pool: &PgPool,
        id: DbId,
        quality_score: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE vendors SET quality_score = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(quality_score)
        .execute(pool)
        .await?;
        Ok(())
    }
}
