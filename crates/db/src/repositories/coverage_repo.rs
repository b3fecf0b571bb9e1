//! Repository for the `vendor_coverage` table.

use sqlx::PgPool;
use veriscore_core::types::DbId;

use crate::models::coverage::{CoverageCell, VendorCoverage};

/// Column list for `vendor_coverage` SELECT queries.
const COLUMNS: &str =
    "id, vendor_id, jurisdiction_id, coverage_percentage, avg_turnaround_hours";

/// Provides query operations for vendor coverage.
pub struct CoverageRepo;

impl CoverageRepo {
    /// List a vendor's coverage rows in jurisdiction order.
    pub async fn list_by_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<VendorCoverage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendor_coverage \
             WHERE vendor_id = $1 ORDER BY jurisdiction_id"
        );
        sqlx::query_as::<_, VendorCoverage>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Full coverage grid across active vendors and active jurisdictions,
    /// with zero-coverage cells for missing pairs.
    pub async fn heatmap_cells(pool: &PgPool) -> Result<Vec<CoverageCell>, sqlx::Error> {
        sqlx::query_as::<_, CoverageCell>(
            "SELECT v.id AS vendor_id, \
                    v.name AS vendor_name, \
                    j.id AS jurisdiction_id, \
                    j.name AS jurisdiction_name, \
                    j.state, \
                    COALESCE(vc.coverage_percentage, 0) AS coverage_percentage \
             FROM vendors v \
             CROSS JOIN jurisdictions j \
             LEFT JOIN vendor_coverage vc \
               ON vc.vendor_id = v.id AND vc.jurisdiction_id = j.id \
             WHERE v.is_active = TRUE AND j.is_active = TRUE \
             ORDER BY v.id, j.id",
        )
        .fetch_all(pool)
        .await
    }
}
