//! Repository for the `criminal_records` table.
//!
//! Serves the scoring engine's record-set fetches and the aggregations the
//! trend, jurisdiction, and turnaround queries need. Rates computed here are
//! fractions x100 to match the engine's percentage convention.

use sqlx::PgPool;
use veriscore_core::analysis::JurisdictionPerformance;
use veriscore_core::record::RecordQuality;
use veriscore_core::types::{round2, DbId, Timestamp};

use crate::models::record::{JurisdictionStatsRow, RecordQualityRow, RecordSample, TrendPoint};

/// Provides query operations for delivered records.
pub struct RecordRepo;

impl RecordRepo {
    /// Fetch the quality view of a vendor's full record set.
    pub async fn quality_rows(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<RecordQuality>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RecordQualityRow>(
            "SELECT pii_status, disposition_verified, freshness_days, turnaround_hours \
             FROM criminal_records WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(RecordQualityRow::into_quality).collect())
    }

    /// Mean turnaround over records delivered in the trailing window.
    ///
    /// `None` when the vendor delivered nothing in the window; the alert
    /// evaluator treats that as absence of data, not a breach.
    pub async fn recent_avg_turnaround(
        pool: &PgPool,
        vendor_id: DbId,
        window_days: i32,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(turnaround_hours) FROM criminal_records \
             WHERE vendor_id = $1 \
               AND vendor_delivery_date >= NOW() - make_interval(days => $2)",
        )
        .bind(vendor_id)
        .bind(window_days)
        .fetch_one(pool)
        .await
    }

    /// Per-day quality aggregation over the trailing window.
    ///
    /// One row per calendar delivery date with at least one record; dates
    /// with zero deliveries are omitted, not zero-filled.
    pub async fn daily_trends(
        pool: &PgPool,
        vendor_id: DbId,
        window_days: i32,
    ) -> Result<Vec<TrendPoint>, sqlx::Error> {
        sqlx::query_as::<_, TrendPoint>(
            "SELECT (vendor_delivery_date AT TIME ZONE 'UTC')::DATE AS date, \
                    (AVG(CASE WHEN pii_status = 'complete' THEN 1.0 ELSE 0.0 END) * 100.0)::DOUBLE PRECISION \
                        AS pii_completeness, \
                    (AVG(CASE WHEN disposition_verified THEN 1.0 ELSE 0.0 END) * 100.0)::DOUBLE PRECISION \
                        AS disposition_accuracy, \
                    AVG(turnaround_hours)::DOUBLE PRECISION AS avg_turnaround, \
                    COUNT(id) AS record_volume \
             FROM criminal_records \
             WHERE vendor_id = $1 \
               AND vendor_delivery_date >= NOW() - make_interval(days => $2) \
             GROUP BY 1 \
             ORDER BY 1",
        )
        .bind(vendor_id)
        .bind(window_days)
        .fetch_all(pool)
        .await
        .map(|points| {
            points
                .into_iter()
                .map(|p| TrendPoint {
                    pii_completeness: round2(p.pii_completeness),
                    disposition_accuracy: round2(p.disposition_accuracy),
                    avg_turnaround: round2(p.avg_turnaround),
                    ..p
                })
                .collect()
        })
    }

    /// Per-jurisdiction performance for every jurisdiction the vendor has a
    /// coverage row in.
    ///
    /// Coverage percentage and turnaround come from the coverage row, not
    /// recomputed; the LEFT JOIN keeps jurisdictions with zero matching
    /// records (record_count 0, rates 0).
    pub async fn jurisdiction_performance(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<JurisdictionPerformance>, sqlx::Error> {
        let rows = sqlx::query_as::<_, JurisdictionStatsRow>(
            "SELECT j.name AS jurisdiction, \
                    j.state, \
                    vc.coverage_percentage, \
                    vc.avg_turnaround_hours, \
                    COUNT(cr.id) AS record_count, \
                    (COALESCE(AVG(CASE WHEN cr.pii_status = 'complete' THEN 1.0 ELSE 0.0 END), 0) * 100.0)::DOUBLE PRECISION \
                        AS pii_completeness_rate, \
                    (COALESCE(AVG(CASE WHEN cr.disposition_verified THEN 1.0 ELSE 0.0 END), 0) * 100.0)::DOUBLE PRECISION \
                        AS disposition_accuracy_rate \
             FROM vendor_coverage vc \
             JOIN jurisdictions j ON j.id = vc.jurisdiction_id \
             LEFT JOIN criminal_records cr \
               ON cr.vendor_id = vc.vendor_id AND cr.jurisdiction_id = vc.jurisdiction_id \
             WHERE vc.vendor_id = $1 \
             GROUP BY j.id, j.name, j.state, vc.coverage_percentage, vc.avg_turnaround_hours \
             ORDER BY j.id",
        )
        .bind(vendor_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| JurisdictionPerformance {
                jurisdiction: row.jurisdiction,
                state: row.state,
                coverage_percentage: row.coverage_percentage,
                avg_turnaround_hours: row.avg_turnaround_hours,
                record_count: row.record_count,
                pii_completeness_rate: round2(row.pii_completeness_rate),
                disposition_accuracy_rate: round2(row.disposition_accuracy_rate),
            })
            .collect())
    }

    /// Sample of a vendor's records created at or before a cutoff, for
    /// schema-change impact assessment.
    pub async fn sample_before(
        pool: &PgPool,
        vendor_id: DbId,
        cutoff: Timestamp,
        limit: i64,
    ) -> Result<Vec<RecordSample>, sqlx::Error> {
        sqlx::query_as::<_, RecordSample>(
            "SELECT id, case_number, defendant_name, disposition_type, created_at \
             FROM criminal_records \
             WHERE vendor_id = $1 AND created_at <= $2 \
             ORDER BY id \
             LIMIT $3",
        )
        .bind(vendor_id)
        .bind(cutoff)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
