//! Vendor entity model.

use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::types::{DbId, Timestamp};

/// A background-check vendor.
///
/// `quality_score` is the cached last-computed composite; the scoring
/// engine's cache-update step and the seeding routine are the only writers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cost_per_record: f64,
    pub quality_score: f64,
    pub coverage_percentage: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}
