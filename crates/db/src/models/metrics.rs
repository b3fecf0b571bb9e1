//! Vendor metric snapshot entity model (append-only trend history).

use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::types::{DbId, Timestamp};

/// A point-in-time snapshot of a vendor's sub-metrics and composite score.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorMetric {
    pub id: DbId,
    pub vendor_id: DbId,
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_freshness_days: f64,
    pub geographic_coverage: f64,
    pub calculated_score: f64,
    pub recorded_at: Timestamp,
}
