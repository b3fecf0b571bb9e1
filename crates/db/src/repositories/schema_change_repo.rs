//! Repository for the `schema_changes` audit table.

use sqlx::PgPool;
use veriscore_core::types::DbId;

use crate::models::schema_change::SchemaChange;

/// Column list for `schema_changes` queries (joined with vendor names).
const COLUMNS: &str = "\
    sc.id, sc.vendor_id, v.name AS vendor_name, sc.change_description, \
    sc.field_affected, sc.old_value, sc.new_value, sc.records_affected, \
    sc.change_date";

/// Provides query operations for schema-change audit records.
pub struct SchemaChangeRepo;

impl SchemaChangeRepo {
    /// Changes within the trailing window, newest first, optionally
    /// restricted to one vendor.
    pub async fn list(
        pool: &PgPool,
        vendor_id: Option<DbId>,
        window_days: i32,
    ) -> Result<Vec<SchemaChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schema_changes sc \
             JOIN vendors v ON v.id = sc.vendor_id \
             WHERE ($1::BIGINT IS NULL OR sc.vendor_id = $1) \
               AND sc.change_date >= NOW() - make_interval(days => $2) \
             ORDER BY sc.change_date DESC"
        );
        sqlx::query_as::<_, SchemaChange>(&query)
            .bind(vendor_id)
            .bind(window_days)
            .fetch_all(pool)
            .await
    }

    /// Find one change by id, joined with its vendor name.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SchemaChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schema_changes sc \
             JOIN vendors v ON v.id = sc.vendor_id \
             WHERE sc.id = $1"
        );
        sqlx::query_as::<_, SchemaChange>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
