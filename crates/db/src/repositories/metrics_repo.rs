//! Repository for the `vendor_metrics` table (append-only snapshots).

use sqlx::PgPool;
use veriscore_core::scoring::QualityMetrics;
use veriscore_core::types::DbId;

use crate::models::metrics::VendorMetric;

/// Column list for `vendor_metrics` SELECT queries.
const COLUMNS: &str = "\
    id, vendor_id, pii_completeness, disposition_accuracy, \
    avg_freshness_days, geographic_coverage, calculated_score, recorded_at";

/// Provides query operations for vendor metric snapshots.
pub struct MetricsRepo;

impl MetricsRepo {
    /// Append a snapshot of freshly computed metrics.
    pub async fn insert_snapshot(
        pool: &PgPool,
        vendor_id: DbId,
        metrics: &QualityMetrics,
    ) -> Result<VendorMetric, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendor_metrics \
                (vendor_id, pii_completeness, disposition_accuracy, \
                 avg_freshness_days, geographic_coverage, calculated_score) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VendorMetric>(&query)
            .bind(vendor_id)
            .bind(metrics.pii_completeness)
            .bind(metrics.disposition_accuracy)
            .bind(metrics.avg_freshness_days)
            .bind(metrics.geographic_coverage)
            .bind(metrics.quality_score)
            .fetch_one(pool)
            .await
    }

    /// Snapshots recorded within the trailing window, newest first.
    pub async fn history(
        pool: &PgPool,
        vendor_id: DbId,
        window_days: i32,
    ) -> Result<Vec<VendorMetric>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendor_metrics \
             WHERE vendor_id = $1 \
               AND recorded_at >= NOW() - make_interval(days => $2) \
             ORDER BY recorded_at DESC"
        );
        sqlx::query_as::<_, VendorMetric>(&query)
            .bind(vendor_id)
            .bind(window_days)
            .fetch_all(pool)
            .await
    }
}
