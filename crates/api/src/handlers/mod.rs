//! HTTP handler modules, one per route group.

pub mod alerts;
pub mod analysis;
pub mod comparison;
pub mod quick;
pub mod vendors;

use sqlx::PgPool;
use veriscore_core::error::CoreError;
use veriscore_core::scoring::{calculate_quality_score, QualityMetrics};
use veriscore_core::types::DbId;
use veriscore_db::models::vendor::Vendor;
use veriscore_db::repositories::{RecordRepo, VendorRepo};

use crate::error::AppResult;

/// Fetch a vendor or fail with a 404.
pub(crate) async fn require_vendor(pool: &PgPool, id: DbId) -> AppResult<Vendor> {
    VendorRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Vendor", id }.into())
}

/// Fetch a vendor's record set and reduce it to quality metrics.
pub(crate) async fn compute_vendor_metrics(
    pool: &PgPool,
    vendor: &Vendor,
) -> AppResult<QualityMetrics> {
    let records = RecordRepo::quality_rows(pool, vendor.id).await?;
    Ok(calculate_quality_score(&records, vendor.coverage_percentage))
}
