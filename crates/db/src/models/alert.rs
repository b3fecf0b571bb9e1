//! Alert and alert-configuration entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veriscore_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A persisted threshold breach.
///
/// Lifecycle timestamps are stamped by the acknowledge/resolve transitions;
/// repeat transitions restamp without guards (deliberately permissive).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub vendor_id: DbId,
    pub alert_type: String,
    pub severity: String,
    pub status: String,
    pub title: String,
    pub description: String,
    pub current_value: f64,
    pub threshold_value: f64,
    pub variance_percentage: f64,
    pub triggered_at: Timestamp,
    pub acknowledged_at: Option<Timestamp>,
    pub resolved_at: Option<Timestamp>,
}

/// An alert row joined with its vendor's name for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertWithVendor {
    pub id: DbId,
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub alert_type: String,
    pub severity: String,
    pub status: String,
    pub title: String,
    pub description: String,
    pub current_value: f64,
    pub threshold_value: f64,
    pub variance_percentage: f64,
    pub triggered_at: Timestamp,
    pub acknowledged_at: Option<Timestamp>,
    pub resolved_at: Option<Timestamp>,
}

/// A vendor-scoped threshold watch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertConfiguration {
    pub id: DbId,
    pub vendor_id: DbId,
    pub alert_type: String,
    pub threshold_value: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for one watch in a configuration-replacement request.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfigInput {
    pub alert_type: String,
    pub threshold_value: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for inserting a new alert row.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub vendor_id: DbId,
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    pub current_value: f64,
    pub threshold_value: f64,
    pub variance_percentage: f64,
}

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

/// Count of alerts grouped by one label (severity, type, or vendor name).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertCount {
    pub label: String,
    pub count: i64,
}
