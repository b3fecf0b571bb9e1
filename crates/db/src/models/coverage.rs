//! Vendor coverage entity model and heatmap projection.

use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::types::DbId;

/// A vendor's claimed/measured footprint in one jurisdiction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorCoverage {
    pub id: DbId,
    pub vendor_id: DbId,
    pub jurisdiction_id: DbId,
    pub coverage_percentage: f64,
    pub avg_turnaround_hours: f64,
}

/// One cell of the vendor x jurisdiction coverage grid, joined with names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CoverageCell {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub jurisdiction_id: DbId,
    pub jurisdiction_name: String,
    pub state: String,
    pub coverage_percentage: f64,
}
