//! Delivered-record entity model and the projections the scoring and trend
//! queries read.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::record::{PiiStatus, RecordQuality};
use veriscore_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single record delivery reported by a vendor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CriminalRecord {
    pub id: DbId,
    pub vendor_id: DbId,
    pub jurisdiction_id: DbId,
    pub case_number: String,
    pub defendant_name: Option<String>,
    pub date_of_birth: Option<Timestamp>,
    pub ssn: Option<String>,
    pub disposition_type: String,
    pub disposition_date: Option<Timestamp>,
    pub filing_date: Option<Timestamp>,
    pub court_filing_date: Timestamp,
    pub pii_status: String,
    pub has_dob: bool,
    pub has_ssn: bool,
    pub has_full_name: bool,
    pub disposition_verified: bool,
    pub vendor_delivery_date: Timestamp,
    pub turnaround_hours: f64,
    pub freshness_days: f64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// The quality columns the scoring engine reads, one row per record.
#[derive(Debug, Clone, FromRow)]
pub struct RecordQualityRow {
    pub pii_status: String,
    pub disposition_verified: bool,
    pub freshness_days: f64,
    pub turnaround_hours: f64,
}

impl RecordQualityRow {
    /// Convert the raw row into the scoring engine's view type.
    pub fn into_quality(self) -> RecordQuality {
        RecordQuality {
            pii_status: PiiStatus::parse_str(&self.pii_status),
            disposition_verified: self.disposition_verified,
            freshness_days: self.freshness_days,
            turnaround_hours: self.turnaround_hours,
        }
    }
}

/// One per-day quality data point in a trend window.
///
/// Dates with zero deliveries are simply absent; rates are fractions x100.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_turnaround: f64,
    pub record_volume: i64,
}

/// Raw per-jurisdiction aggregation row (rates still fractions x100).
#[derive(Debug, Clone, FromRow)]
pub struct JurisdictionStatsRow {
    pub jurisdiction: String,
    pub state: String,
    pub coverage_percentage: f64,
    pub avg_turnaround_hours: f64,
    pub record_count: i64,
    pub pii_completeness_rate: f64,
    pub disposition_accuracy_rate: f64,
}

/// Abbreviated record row returned by the schema-change impact sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecordSample {
    pub id: DbId,
    pub case_number: String,
    pub defendant_name: Option<String>,
    pub disposition_type: String,
    pub created_at: Timestamp,
}
