//! Handlers for alert listing, SLA evaluation, lifecycle transitions, and
//! threshold configuration.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use veriscore_core::alert::{
    self, AlertBreach, AlertSeverity, AlertStatus, AlertType, MetricSnapshot,
};
use veriscore_core::error::CoreError;
use veriscore_core::types::{round2, DbId};
use veriscore_core::validation;
use veriscore_db::models::alert::{AlertConfigInput, AlertWithVendor};
use veriscore_db::repositories::{AlertRepo, RecordRepo};

use crate::error::AppResult;
use crate::handlers::{compute_vendor_metrics, require_vendor};
use crate::response::DataResponse;
use crate::state::AppState;

/// Trailing window for the turnaround SLA check.
const TURNAROUND_WINDOW_DAYS: i32 = 7;

// ---------------------------------------------------------------------------
// GET /alerts -- recent alerts with optional filters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AlertListQuery {
    pub limit: Option<i64>,
    pub vendor_id: Option<DbId>,
    pub severity: Option<String>,
    pub status: Option<String>,
}

/// Most recent alerts, optionally filtered by vendor, severity, and status.
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50);
    validation::validate_limit(limit)?;

    let mut alerts = AlertRepo::recent(&state.pool, limit, params.vendor_id).await?;

    if let Some(severity) = &params.severity {
        alerts.retain(|a| &a.severity == severity);
    }
    if let Some(status) = &params.status {
        alerts.retain(|a| &a.status == status);
    }

    Ok(Json(DataResponse { data: alerts }))
}

// ---------------------------------------------------------------------------
// GET /alerts/summary -- window statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VendorAlertCount {
    pub vendor_name: String,
    pub alert_count: i64,
}

#[derive(Debug, Serialize)]
pub struct AlertSummary {
    pub period_days: i64,
    pub total_alerts: i64,
    pub resolved_alerts: i64,
    pub resolution_rate: f64,
    pub by_severity: BTreeMap<String, i64>,
    pub by_type: BTreeMap<String, i64>,
    pub by_vendor: Vec<VendorAlertCount>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<i64>,
}

/// Alert statistics over the trailing window.
pub async fn alert_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryQuery>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(30);
    validation::validate_window_days(days)?;
    let window = days as i32;

    let total = AlertRepo::count_in_window(&state.pool, window).await?;
    let resolved = AlertRepo::count_resolved_in_window(&state.pool, window).await?;
    let by_severity = AlertRepo::counts_by_severity(&state.pool, window).await?;
    let by_type = AlertRepo::counts_by_type(&state.pool, window).await?;
    let by_vendor = AlertRepo::counts_by_vendor(&state.pool, window).await?;

    let summary = AlertSummary {
        period_days: days,
        total_alerts: total,
        resolved_alerts: resolved,
        resolution_rate: if total > 0 {
            round2(resolved as f64 / total as f64 * 100.0)
        } else {
            0.0
        },
        by_severity: by_severity.into_iter().map(|c| (c.label, c.count)).collect(),
        by_type: by_type.into_iter().map(|c| (c.label, c.count)).collect(),
        by_vendor: by_vendor
            .into_iter()
            .map(|c| VendorAlertCount {
                vendor_name: c.label,
                alert_count: c.count,
            })
            .collect(),
    };

    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// GET /alerts/types -- enum values
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AlertTypes {
    pub alert_types: Vec<&'static str>,
    pub severity_levels: Vec<&'static str>,
    pub status_options: Vec<&'static str>,
}

pub async fn alert_types() -> Json<DataResponse<AlertTypes>> {
    Json(DataResponse {
        data: AlertTypes {
            alert_types: AlertType::ALL.iter().map(AlertType::as_str).collect(),
            severity_levels: AlertSeverity::ALL.iter().map(AlertSeverity::as_str).collect(),
            status_options: AlertStatus::ALL.iter().map(AlertStatus::as_str).collect(),
        },
    })
}

// ---------------------------------------------------------------------------
// GET /alerts/vendor/{vendor_id} -- alerts for one vendor
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VendorAlerts {
    pub vendor_id: DbId,
    pub alerts: Vec<AlertWithVendor>,
}

#[derive(Debug, Deserialize)]
pub struct VendorAlertsQuery {
    pub limit: Option<i64>,
}

pub async fn vendor_alerts(
    State(state): State<AppState>,
    Path(vendor_id): Path<DbId>,
    Query(params): Query<VendorAlertsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50);
    validation::validate_limit(limit)?;

    let alerts = AlertRepo::recent(&state.pool, limit, Some(vendor_id)).await?;

    Ok(Json(DataResponse {
        data: VendorAlerts { vendor_id, alerts },
    }))
}

// ---------------------------------------------------------------------------
// GET /alerts/vendor/{vendor_id}/sla-check -- evaluate thresholds now
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SlaCheck {
    pub vendor_id: DbId,
    pub sla_compliance: bool,
    pub alerts: Vec<AlertBreach>,
}

/// Evaluate every active threshold watch against freshly computed metrics.
///
/// Breaches are synthesized, not persisted.
pub async fn sla_check(
    State(state): State<AppState>,
    Path(vendor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = require_vendor(&state.pool, vendor_id).await?;
    let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;
    let recent_turnaround =
        RecordRepo::recent_avg_turnaround(&state.pool, vendor_id, TURNAROUND_WINDOW_DAYS).await?;

    let configs = AlertRepo::configs_for_vendor(&state.pool, vendor_id, true).await?;
    let watches: Vec<(AlertType, f64)> = configs
        .iter()
        .filter_map(|c| Some((AlertType::parse_str(&c.alert_type)?, c.threshold_value)))
        .collect();

    let snapshot = MetricSnapshot {
        pii_completeness: metrics.pii_completeness,
        disposition_accuracy: metrics.disposition_accuracy,
        recent_avg_turnaround_hours: recent_turnaround,
        coverage_percentage: vendor.coverage_percentage,
        quality_score: vendor.quality_score,
    };

    let breaches = alert::evaluate_all(&watches, &snapshot);

    Ok(Json(DataResponse {
        data: SlaCheck {
            vendor_id,
            sla_compliance: breaches.is_empty(),
            alerts: breaches,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /alerts/configure -- replace a vendor's configurations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConfigureRequest {
    pub vendor_id: DbId,
    pub configurations: Vec<AlertConfigInput>,
}

/// Replace a vendor's threshold watches wholesale (delete-then-reinsert).
pub async fn configure_thresholds(
    State(state): State<AppState>,
    Json(request): Json<ConfigureRequest>,
) -> AppResult<impl IntoResponse> {
    require_vendor(&state.pool, request.vendor_id).await?;

    for config in &request.configurations {
        if AlertType::parse_str(&config.alert_type).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown alert type: {}",
                config.alert_type
            ))
            .into());
        }
    }

    AlertRepo::replace_configs(&state.pool, request.vendor_id, &request.configurations).await?;

    tracing::info!(
        vendor_id = request.vendor_id,
        configurations = request.configurations.len(),
        "Alert thresholds configured",
    );

    let configs = AlertRepo::configs_for_vendor(&state.pool, request.vendor_id, false).await?;
    Ok(Json(DataResponse { data: configs }))
}

// ---------------------------------------------------------------------------
// GET /alerts/configurations/{vendor_id} -- list configurations
// ---------------------------------------------------------------------------

pub async fn list_configurations(
    State(state): State<AppState>,
    Path(vendor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let configs = AlertRepo::configs_for_vendor(&state.pool, vendor_id, false).await?;
    Ok(Json(DataResponse { data: configs }))
}

// ---------------------------------------------------------------------------
// POST /alerts/{id}/acknowledge, /alerts/{id}/resolve
// ---------------------------------------------------------------------------

/// Acknowledge an alert, stamping `acknowledged_at` with now.
///
/// Repeat calls restamp; transitions carry no ordering guard.
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let alert = AlertRepo::acknowledge(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Alert", id })?;
    Ok(Json(DataResponse { data: alert }))
}

/// Resolve an alert, stamping `resolved_at` with now.
///
/// Repeat calls restamp; transitions carry no ordering guard.
pub async fn resolve_alert(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let alert = AlertRepo::resolve(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Alert", id })?;
    Ok(Json(DataResponse { data: alert }))
}
