//! Repository for the `jurisdictions` table.

use sqlx::PgPool;

use crate::models::jurisdiction::Jurisdiction;

/// Column list for `jurisdictions` SELECT queries.
const COLUMNS: &str = "id, name, state, county, is_active";

/// Provides query operations for jurisdictions.
pub struct JurisdictionRepo;

impl JurisdictionRepo {
    /// List all active jurisdictions in id order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Jurisdiction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jurisdictions WHERE is_active = TRUE ORDER BY id"
        );
        sqlx::query_as::<_, Jurisdiction>(&query)
            .fetch_all(pool)
            .await
    }
}
